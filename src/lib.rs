/*! # `lookbook`

A library crate for the Lookbook outfit-sharing app.

## Purpose

This is the shared brain behind Lookbook's tagging screens. Every post
gets tagged with brands and occasions, and those tags come from two pools:
a global catalog everyone shares, and the custom tags each user invents
for themselves. This crate reconciles the two pools into one deduplicated,
ranked list, tracks what's picked for the post being composed, and keeps
custom-tag membership in sync with the hosted backend.

The screens themselves (React-side) stay dumb: they render what
[`catalog::TagCatalog`] hands them and forward taps back into it.

## Status

Under active development.

- [x] Tag catalog
    - [x] Reconciled global + custom tag sets (case-insensitive dedup)
    - [x] Ranked search (selected, then yours, then everyone's)
    - [x] Write-through custom tag add/delete
    - [x] Session-local selection + post snapshot
- [x] Recent searches
- [x] Outfit labels via the vision service (best-effort)
- [ ] Tag management screen support (bulk delete, rename?)
    - Issueify but: rename needs a story for posts that already carry the
      old display string.
- [ ] Offline queue for custom-tag writes
*/

pub mod catalog;
pub mod config;
pub mod error;
pub mod recents;
pub mod store;
pub mod types;
pub mod vision;
