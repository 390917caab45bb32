use super::{CloudmasterConfig, CONFIG_DIR};

// Config
use std::env;
use std::fs;
use std::path::PathBuf;

// Error Handling
use cloudmaster_error::{CloudmasterError, WrapError};
use log::info;

impl CloudmasterConfig {
    /*
     * Get config from crate directory
     */
    fn debug_path() -> PathBuf {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("./cloudmaster.config.toml");
        return path;
    }
    /*
     * Get config from FHS path.
     */
    fn release_path() -> PathBuf {
        let mut path = PathBuf::new();
        path.push(CONFIG_DIR.to_owned() + "/config.toml");
        return path;
    }
    /// The environment overrides the config file: the gateway url is
    /// the one value the whole client needs.
    pub fn get() -> Result<Self, CloudmasterError> {
        if let Ok(api_url) = env::var("CLOUDMASTER_API_URL") {
            return Ok(Self {
                api_url,
                interval: None,
            });
        }

        info!("Search config file.");

        #[cfg(debug_assertions)]
        let path = Self::debug_path();

        #[cfg(not(debug_assertions))]
        let path = Self::release_path();

        let path = path.display().to_string();
        match Self::from_file(&path) {
            Ok(config) => Ok(config),
            Err(e) => {
                let message = format!("Couldn't load configuration from {:#?}", path);
                let help = "Set CLOUDMASTER_API_URL or declare api_url in the config file.";
                let err = WrapError::builder()
                    .msg(&message)
                    .help(help)
                    .origin(e.into())
                    .build();
                Err(err.into())
            }
        }
    }
    pub fn from_file(path: &str) -> Result<Self, CloudmasterError> {
        let string = fs::read_to_string(path)?;
        Self::from_toml(&string)
    }
    pub fn from_toml(string: &str) -> Result<Self, CloudmasterError> {
        let res = toml::from_str::<Self>(string)?;
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn get_config_from_toml() -> Result<(), CloudmasterError> {
        let toml = r#"
            api_url = "https://gateway.example.com/dispatch/"
            interval = 2000
        "#;

        let res = CloudmasterConfig::from_toml(&toml)?;
        assert_eq!(res.api_url, "https://gateway.example.com/dispatch/");
        assert_eq!(res.interval().as_millis(), 2000);
        Ok(())
    }

    #[test]
    fn interval_defaults_to_five_seconds() -> Result<(), CloudmasterError> {
        let toml = r#"
            api_url = "https://gateway.example.com/dispatch/"
        "#;

        let res = CloudmasterConfig::from_toml(&toml)?;
        assert_eq!(res.interval().as_millis(), 5000);
        Ok(())
    }

    #[test]
    fn get_config_from_file() -> Result<(), CloudmasterError> {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("cloudmaster.config.toml");

        let res = CloudmasterConfig::from_file(&path.display().to_string())?;
        assert!(!res.api_url.is_empty());
        Ok(())
    }

    #[test]
    fn environment_overrides_config_file() -> Result<(), CloudmasterError> {
        env::set_var("CLOUDMASTER_API_URL", "https://gateway.example.com/env/");
        let res = CloudmasterConfig::get();
        env::remove_var("CLOUDMASTER_API_URL");

        assert_eq!(res?.api_url, "https://gateway.example.com/env/");
        Ok(())
    }
}
