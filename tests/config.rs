// ABOUTME: Integration tests for configuration parsing and validation.
// ABOUTME: Tests YAML parsing, env var references, discovery, and init scaffolding.

use maas_redeploy::config::*;
use maas_redeploy::controller::MaasClient;
use maas_redeploy::error::Error;
use std::fs;
use std::time::Duration;

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let yaml = r#"
maas:
  url: http://maas.local:5240/MAAS
  api_key: ck:tk:ts
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(
            config.maas.url,
            ConfigValue::inline("http://maas.local:5240/MAAS")
        );
        assert_eq!(config.maas.timeout, Duration::from_secs(30));
        assert_eq!(config.maas.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.readiness.timeout, Duration::from_secs(100));
        assert_eq!(config.readiness.interval, Duration::from_secs(5));
        assert_eq!(config.release_comment, DEFAULT_RELEASE_COMMENT);
        assert_eq!(config.concurrency, 4);
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
maas:
  url:
    env: MAAS_URL
    default: http://10.0.0.2:5240/MAAS
  api_key:
    env: MAAS_API_KEY
  timeout: 1m
  connect_timeout: 2s

readiness:
  timeout: 5m
  interval: 10s

release_comment: Nightly image roll
concurrency: 8
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.maas.timeout, Duration::from_secs(60));
        assert_eq!(config.maas.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.readiness.timeout, Duration::from_secs(300));
        assert_eq!(config.readiness.interval, Duration::from_secs(10));
        assert_eq!(config.release_comment, "Nightly image roll");
        assert_eq!(config.concurrency, 8);

        let policy = config.readiness.policy();
        assert_eq!(policy.timeout, Duration::from_secs(300));
        assert_eq!(policy.interval, Duration::from_secs(10));
    }

    #[test]
    fn missing_maas_section_is_an_error() {
        let err = Config::from_yaml("concurrency: 2\n").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }
}

mod validation {
    use super::*;

    const BASE: &str = "maas:\n  url: http://maas.local/MAAS\n  api_key: ck:tk:ts\n";

    #[test]
    fn zero_interval_rejected() {
        let yaml = format!("{BASE}readiness:\n  interval: 0s\n");
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(ref m) if m.contains("interval")));
    }

    #[test]
    fn zero_concurrency_rejected() {
        let yaml = format!("{BASE}concurrency: 0\n");
        let err = Config::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(ref m) if m.contains("concurrency")));
    }

    #[test]
    fn https_url_rejected() {
        let yaml = "maas:\n  url: https://maas.local/MAAS\n  api_key: ck:tk:ts\n";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn zero_timeout_is_allowed() {
        let yaml = format!("{BASE}readiness:\n  timeout: 0s\n");
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.readiness.timeout, Duration::ZERO);
    }
}

mod env_values {
    use super::*;

    #[test]
    fn resolves_from_environment() {
        temp_env::with_var("MAAS_REDEPLOY_TEST_KEY", Some("a:b:c"), || {
            let value = ConfigValue::env("MAAS_REDEPLOY_TEST_KEY");
            assert_eq!(value.resolve().unwrap(), "a:b:c");
        });
    }

    #[test]
    fn falls_back_to_default() {
        temp_env::with_var_unset("MAAS_REDEPLOY_TEST_URL", || {
            let value =
                ConfigValue::env("MAAS_REDEPLOY_TEST_URL").or_default("http://fallback/MAAS");
            assert_eq!(value.resolve().unwrap(), "http://fallback/MAAS");
        });
    }

    #[test]
    fn missing_variable_is_reported() {
        temp_env::with_var_unset("MAAS_REDEPLOY_TEST_MISSING", || {
            let value = ConfigValue::env("MAAS_REDEPLOY_TEST_MISSING");
            let err = value.resolve().unwrap_err();
            assert!(matches!(err, Error::MissingEnvVar(ref v) if v == "MAAS_REDEPLOY_TEST_MISSING"));
        });
    }

    #[test]
    fn client_builds_from_env_backed_config() {
        let yaml = r#"
maas:
  url: http://maas.local:5240/MAAS
  api_key:
    env: MAAS_REDEPLOY_TEST_CLIENT_KEY
"#;
        let config = Config::from_yaml(yaml).unwrap();

        temp_env::with_var("MAAS_REDEPLOY_TEST_CLIENT_KEY", Some("ck:tk:ts"), || {
            assert!(MaasClient::from_config(&config.maas).is_ok());
        });

        temp_env::with_var("MAAS_REDEPLOY_TEST_CLIENT_KEY", Some("not-a-key"), || {
            let err = MaasClient::from_config(&config.maas).unwrap_err();
            assert!(matches!(err, Error::InvalidConfig(ref m) if m.contains("api_key")));
        });
    }
}

mod discovery {
    use super::*;

    const YAML: &str = "maas:\n  url: http://maas.local/MAAS\n  api_key: ck:tk:ts\n";

    #[test]
    fn finds_primary_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), YAML).unwrap();
        assert!(Config::discover(dir.path()).is_ok());
    }

    #[test]
    fn finds_alternate_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME_ALT), YAML).unwrap();
        assert!(Config::discover(dir.path()).is_ok());
    }

    #[test]
    fn finds_dot_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".maas-redeploy")).unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME_DIR), YAML).unwrap();
        assert!(Config::discover(dir.path()).is_ok());
    }

    #[test]
    fn reports_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::discover(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }
}

mod init {
    use super::*;

    #[test]
    fn writes_template_with_url() {
        let dir = tempfile::tempdir().unwrap();
        init_config(dir.path(), Some("http://10.1.2.3:5240/MAAS"), false).unwrap();

        let config = Config::load(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(
            config.maas.url,
            ConfigValue::inline("http://10.1.2.3:5240/MAAS")
        );
        assert_eq!(
            config.maas.api_key,
            ConfigValue::env("MAAS_API_KEY")
        );
    }

    #[test]
    fn refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "existing: config").unwrap();

        let err = init_config(dir.path(), None, false).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing: config");

        init_config(dir.path(), None, true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("MAAS_API_KEY"));
    }

    #[test]
    fn rejects_https_url() {
        let dir = tempfile::tempdir().unwrap();
        let err = init_config(dir.path(), Some("https://maas/MAAS"), false).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(!dir.path().join(CONFIG_FILENAME).exists());
    }
}
