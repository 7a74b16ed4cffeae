//! Display ordering for reconciled tags.
//!
//! The compose screen shows one flat list, so ordering carries the meaning:
//! tags already on the post float to the top, then the user's own tags,
//! then the shared catalog. Within each bucket, fetch order sticks - the
//! sort over these buckets must be stable, or the list would shuffle
//! between keystrokes.

use crate::types::Tag;

/// Sort bucket for one tag. Lower sorts first.
pub(crate) fn bucket(tag: &Tag, selected: &[String]) -> u8 {
    let key = tag.key();

    if selected.iter().any(|s| *s == key) {
        0
    } else if tag.is_custom() {
        1
    } else {
        2
    }
}
