use anyhow::{bail, Result};
use figment::{providers::Format, Figment};
use serde::{de::DeserializeOwned, Serialize};
use std::{marker::PhantomData, path::PathBuf};

/// The builder we use to build Config
/// this loads from multiple sources (in order of preference):
///
/// 1. cli args
/// 2. environment variables
/// 3. config file
/// 4. struct defaults
#[derive(Debug)]
pub struct ConfigBuilder<CONFIG, ARG> {
    pub cli_env_args: ARG,
    _config: PhantomData<CONFIG>,
}

pub trait CliEnvExt: Serialize + DeserializeOwned + Default + std::fmt::Debug {
    // e.g. "MERIDIAN_CLI"
    const ENV_VAR_PREFIX: &'static str;

    // The section identifier in the TOML file, e.g. "cli"
    const TOML_IDENTIFIER: &'static str;

    // an optional argument to specify the home directory
    // if not supplied, config will try a series of fallbacks
    fn home_dir(&self) -> Option<PathBuf>;

    // an optional argument to specify the dotenv file
    fn dotenv_path(&self) -> Option<PathBuf>;

    fn merge_cli_env_args(&self) -> Result<Self> {
        let env_prefix = format!("{}_", Self::ENV_VAR_PREFIX);

        let _self = Figment::new()
            .merge(figment::providers::Env::prefixed(&env_prefix))
            .merge(figment::providers::Serialized::defaults(self))
            .extract()?;

        Ok(_self)
    }

    fn env_var(name: &str) -> Option<String> {
        std::env::var(format!("{}_{name}", Self::ENV_VAR_PREFIX)).ok()
    }
}

pub trait ConfigExt: Serialize + DeserializeOwned + Default + std::fmt::Debug {
    // e.g. "meridian-cli.toml"
    const FILENAME: &'static str;

    // the directory name used for config-file fallbacks, e.g. "meridian"
    const DIRNAME: &'static str;

    /// Expand user paths (tilde etc.) after all merging is done
    fn expand_paths(&mut self) {}

    fn log_levels(&self) -> impl Iterator<Item = &str>;

    fn tracing_env_filter(&self) -> Result<tracing_subscriber::EnvFilter> {
        let mut filter = tracing_subscriber::EnvFilter::from_default_env();
        for directive in self.log_levels() {
            match directive.parse() {
                Ok(directive) => filter = filter.add_directive(directive),
                Err(err) => bail!("{}: {}", err, directive),
            }
        }

        Ok(filter)
    }
}

impl<CONFIG: ConfigExt, ARG: CliEnvExt> ConfigBuilder<CONFIG, ARG> {
    pub fn new(cli_env_args: ARG) -> Self {
        Self {
            cli_env_args,
            _config: PhantomData,
        }
    }

    pub fn build(self) -> Result<CONFIG> {
        // try to load dotenv first, since it may affect env vars for filepaths
        let mut dotenv_paths = Vec::new();

        if let Some(dotenv_path) = self.cli_env_args.dotenv_path() {
            dotenv_paths.push(dotenv_path);
        }

        if let Some(dotenv_path) = ARG::env_var("DOTENV") {
            dotenv_paths.push(PathBuf::from(dotenv_path));
        }

        dotenv_paths.push(std::env::current_dir()?.join(".env"));

        for dotenv_path in dotenv_paths {
            if dotenv_path.exists() {
                if let Err(e) = dotenvy::from_path(dotenv_path) {
                    bail!("Error loading dotenv file: {}", e);
                }
            }
        }

        // first merge the cli and env vars
        let cli_env_args = self.cli_env_args.merge_cli_env_args()?;

        // then get the filepath for our file-based config
        // a missing file is fine - defaults and cli/env args still apply
        let filepath = ConfigFilePath::new(
            CONFIG::FILENAME,
            CONFIG::DIRNAME,
            cli_env_args.home_dir(),
            ARG::env_var("HOME").map(PathBuf::from),
        )
        .into_path();

        // Start with the default values as the base
        let mut figment =
            Figment::new().merge(figment::providers::Serialized::defaults(CONFIG::default()));

        if let Some(filepath) = &filepath {
            figment = figment
                // Then add default section from TOML
                .merge(Figment::from(
                    figment::providers::Toml::file(filepath).nested(),
                ))
                // Then add specific section, overriding globals where needed
                .merge(
                    Figment::from(figment::providers::Toml::file(filepath).nested())
                        .select(ARG::TOML_IDENTIFIER),
                );
        }

        // Finally override with cli/env args
        let figment = figment.merge(figment::providers::Serialized::defaults(cli_env_args));

        // Extract the config
        let mut config: CONFIG = figment.extract()?;

        config.expand_paths();

        Ok(config)
    }
}

// a helper to try a series of fallback paths, looking for a config file
#[derive(Clone, Debug)]
pub struct ConfigFilePath {
    // the filename to look for in each directory, e.g. "meridian-cli.toml"
    pub filename: String,
    // the directory name for dotdir/config-dir fallbacks, e.g. "meridian"
    pub dirname: String,
    // the optional directory set via direct args
    pub arg_dir: Option<PathBuf>,
    // the optional directory set via {ENV_PREFIX}_HOME
    pub env_dir: Option<PathBuf>,
}

impl ConfigFilePath {
    pub fn new(
        filename: impl ToString,
        dirname: impl ToString,
        arg_dir: Option<PathBuf>,
        env_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            filename: filename.to_string(),
            dirname: dirname.to_string(),
            arg_dir,
            env_dir,
        }
    }

    pub fn into_path(self) -> Option<PathBuf> {
        self.into_possible().into_iter().find(|path| path.exists())
    }

    // tries a series of fallbacks
    pub fn into_possible(self) -> Vec<PathBuf> {
        let Self {
            filename,
            dirname,
            arg_dir,
            env_dir,
        } = self;

        // the paths returned will be tried in order of pushing
        let mut dirs = Vec::new();

        // explicit, e.g. passing --home /foo to the binary
        // i.e. the path in this case will be /foo/{filename}
        if let Some(dir) = arg_dir {
            dirs.push(dir);
        }

        // env var {ENV_PREFIX}_HOME
        if let Some(dir) = env_dir {
            dirs.push(dir);
        }

        // next, check the current working directory, wherever the command is run from
        // i.e. ./{filename}
        if let Ok(dir) = std::env::current_dir() {
            dirs.push(dir);
        }

        // the user's home directory directly, not in the `.config` subdirectory
        // to not pollute the home directory, it looks for ~/.{dirname}/{filename}
        if let Some(dir) = dirs::home_dir().map(|dir| dir.join(format!(".{dirname}"))) {
            dirs.push(dir);
        }

        // the system config directory, e.g. ~/.config/{dirname}/{filename} on linux
        if let Some(dir) = dirs::config_dir().map(|dir| dir.join(&dirname)) {
            dirs.push(dir);
        }

        // config_dir above may have already added this, but on systems that place
        // the config dir elsewhere it's helpful to add it explicitly
        if let Some(dir) = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .map(|dir| dir.join(&dirname))
        {
            dirs.push(dir);
        }

        if let Some(dir) = dirs::home_dir().map(|dir| dir.join(".config").join(&dirname)) {
            dirs.push(dir);
        }

        // Lastly, try /etc/{dirname}/{filename}
        dirs.push(PathBuf::from("/etc").join(&dirname));

        // now we have a list of directories to check, we need to add the filename to each
        let mut all_files: Vec<PathBuf> = dirs.into_iter().map(|dir| dir.join(&filename)).collect();

        all_files.dedup();

        all_files
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize, Default)]
    #[serde(default)]
    struct TestArgs {
        #[serde(skip_serializing_if = "Option::is_none")]
        home: Option<PathBuf>,
        #[serde(skip_serializing_if = "Option::is_none")]
        endpoint: Option<String>,
    }

    impl CliEnvExt for TestArgs {
        const ENV_VAR_PREFIX: &'static str = "MERIDIAN_CONFIG_TEST";
        const TOML_IDENTIFIER: &'static str = "cli";

        fn home_dir(&self) -> Option<PathBuf> {
            self.home.clone()
        }

        fn dotenv_path(&self) -> Option<PathBuf> {
            None
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct TestConfig {
        endpoint: String,
        log_level: Vec<String>,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                endpoint: "http://127.0.0.1:8545".to_string(),
                log_level: vec!["info".to_string()],
            }
        }
    }

    impl ConfigExt for TestConfig {
        const FILENAME: &'static str = "config-builder-test.toml";
        const DIRNAME: &'static str = "meridian-config-test";

        fn log_levels(&self) -> impl Iterator<Item = &str> {
            self.log_level.iter().map(|s| s.as_str())
        }
    }

    fn build(home: PathBuf, endpoint: Option<String>) -> TestConfig {
        ConfigBuilder::new(TestArgs {
            home: Some(home),
            endpoint,
        })
        .build()
        .unwrap()
    }

    #[test]
    fn file_overrides_defaults_and_args_override_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(TestConfig::FILENAME),
            "[default]\nendpoint = \"http://from-file:8545\"\n",
        )
        .unwrap();

        let config = build(dir.path().to_path_buf(), None);
        assert_eq!(config.endpoint, "http://from-file:8545");

        let config = build(
            dir.path().to_path_buf(),
            Some("http://from-args:8545".to_string()),
        );
        assert_eq!(config.endpoint, "http://from-args:8545");
    }

    #[test]
    fn section_overrides_the_default_section() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(TestConfig::FILENAME),
            "[default]\nendpoint = \"http://from-file:8545\"\n\n[cli]\nendpoint = \"http://from-section:8545\"\n",
        )
        .unwrap();

        let config = build(dir.path().to_path_buf(), None);
        assert_eq!(config.endpoint, "http://from-section:8545");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = build(dir.path().to_path_buf(), None);
        assert_eq!(config.endpoint, "http://127.0.0.1:8545");
        assert_eq!(config.log_level, vec!["info"]);
    }

    #[test]
    fn tracing_filter_rejects_bad_directives() {
        let config = TestConfig {
            log_level: vec!["not a directive!!!".to_string()],
            ..TestConfig::default()
        };
        assert!(config.tracing_env_filter().is_err());
    }

    #[test]
    fn explicit_home_is_tried_first() {
        let path = ConfigFilePath::new("a.toml", "meridian", Some(PathBuf::from("/explicit")), None)
            .into_possible();
        assert_eq!(path[0], PathBuf::from("/explicit/a.toml"));
        assert_eq!(path.last().unwrap(), &PathBuf::from("/etc/meridian/a.toml"));
    }
}
