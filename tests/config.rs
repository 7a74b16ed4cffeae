//! Checks the config's round-trip from disk.

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use anyhow::Result;
    use lookbook::{
        config::{BugReportInfo, Config, StoreConfig, VisionConfig},
        error::ConfigError,
    };
    use temp_dir::TempDir;

    fn sample_config(data_dir: PathBuf) -> Config {
        Config::new(
            StoreConfig {
                base_url: String::from("https://example.supabase.co"),
                api_key: String::from("anon-key"),
                request_timeout_secs: 30,
            },
            VisionConfig {
                base_url: String::from("https://vision.example.com"),
                enabled: true,
            },
            data_dir,
            sample_bug_report_info(),
        )
    }

    /// Sample bug report information for usage in tests, to decrease
    /// verbosity.
    fn sample_bug_report_info() -> BugReportInfo {
        BugReportInfo {
            app_name: String::from("lookbook testing"),
            app_version: String::from("0.1.0"),
            device: String::from("desktop"),
            display: String::from("lineage_and_some_other_stuff"),
            target_triple: String::from("x86_64-unknown-linux-gnu"),
            commit: String::from("unknown"),
            repo: String::from("https://github.com/lookbook-app/lookbook"),
            build_time: String::from("unknown"),
        }
    }

    #[tokio::test]
    async fn from_disk_round_trips() -> Result<()> {
        let dir = TempDir::new()?;
        let data_dir = dir.path().to_path_buf();

        let conf = sample_config(data_dir.clone());

        tokio::fs::create_dir_all(data_dir.join("shared_prefs")).await?;
        tokio::fs::write(
            data_dir.join("shared_prefs/config.toml"),
            toml::to_string_pretty(&conf)?,
        )
        .await?;

        let loaded = Config::from_disk(data_dir).await?;
        assert_eq!(loaded, conf);

        Ok(())
    }

    /// A config whose recorded data dir doesn't match where we found it is
    /// stale and gets refused.
    #[tokio::test]
    async fn mismatched_data_dir_is_rejected() -> Result<()> {
        let dir = TempDir::new()?;
        let data_dir = dir.path().to_path_buf();

        // recorded against some other install's paths
        let conf = sample_config(PathBuf::from("/data/somewhere/else"));

        tokio::fs::create_dir_all(data_dir.join("shared_prefs")).await?;
        tokio::fs::write(
            data_dir.join("shared_prefs/config.toml"),
            toml::to_string_pretty(&conf)?,
        )
        .await?;

        let err = Config::from_disk(data_dir)
            .await
            .expect_err("stale paths shouldn't load");
        assert!(matches!(err, ConfigError::PathMismatch));

        Ok(())
    }

    #[tokio::test]
    async fn missing_file_reports_read_failed() -> Result<()> {
        let dir = TempDir::new()?;

        let err = Config::from_disk(dir.path().to_path_buf())
            .await
            .expect_err("there's no config there");
        assert!(matches!(err, ConfigError::ReadFailed(_)));

        Ok(())
    }
}
