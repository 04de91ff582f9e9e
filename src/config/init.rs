// ABOUTME: Config scaffolding for new installations.
// ABOUTME: Creates a maas-redeploy.yml template that reads the API key from the environment.

use std::path::Path;

use crate::error::{Error, Result};

use super::{CONFIG_FILENAME, DEFAULT_RELEASE_COMMENT};

const DEFAULT_URL: &str = "http://maas.example.com:5240/MAAS";

pub fn init_config(dir: &Path, url: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let url = url.unwrap_or(DEFAULT_URL);
    if !url.starts_with("http://") {
        return Err(Error::InvalidConfig(format!(
            "maas.url must be an http:// URL, got {}",
            url
        )));
    }

    std::fs::write(&config_path, generate_template_yaml(url))?;

    Ok(())
}

fn generate_template_yaml(url: &str) -> String {
    format!(
        r#"maas:
  url: {}
  # consumer_key:token_key:token_secret, from `maas apikey --username <user>`
  api_key:
    env: MAAS_API_KEY
  timeout: 30s
  connect_timeout: 5s

readiness:
  timeout: 100s
  interval: 5s

release_comment: {}
concurrency: 4
"#,
        url, DEFAULT_RELEASE_COMMENT
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn template_parses_back() {
        let config = Config::from_yaml(&generate_template_yaml(DEFAULT_URL)).unwrap();
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.release_comment, DEFAULT_RELEASE_COMMENT);
    }
}
