//! Typed agent arguments.
//!
//! Agents are configured with whitespace-separated `key=value` words, e.g.
//! `--slide "name=td alpha=0.01"` or `--place "seed=42"`.

use std::str::FromStr;

use thiserror::Error;

use crate::learner::DEFAULT_ALPHA;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("expected key=value, got {0:?}")]
    MalformedPair(String),

    #[error("unknown key {key:?} for the {agent} agent")]
    UnknownKey { agent: &'static str, key: String },

    #[error("invalid value {value:?} for key {key:?}")]
    InvalidValue { key: String, value: String },
}

fn pairs(args: &str) -> impl Iterator<Item = Result<(&str, &str), ConfigError>> {
    args.split_whitespace().map(|word| {
        word.split_once('=')
            .filter(|(key, _)| !key.is_empty())
            .ok_or_else(|| ConfigError::MalformedPair(word.to_string()))
    })
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliderConfig {
    pub name: String,
    pub alpha: f32,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            name: "slide".to_string(),
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl FromStr for SliderConfig {
    type Err = ConfigError;

    fn from_str(args: &str) -> Result<Self, Self::Err> {
        let mut config = Self::default();
        for pair in pairs(args) {
            match pair? {
                ("name", value) => config.name = value.to_string(),
                ("alpha", value) => config.alpha = parse_value("alpha", value)?,
                (key, _) => {
                    return Err(ConfigError::UnknownKey {
                        agent: "slider",
                        key: key.to_string(),
                    });
                }
            }
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacerConfig {
    pub name: String,
    pub seed: Option<u64>,
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            name: "place".to_string(),
            seed: None,
        }
    }
}

impl FromStr for PlacerConfig {
    type Err = ConfigError;

    fn from_str(args: &str) -> Result<Self, Self::Err> {
        let mut config = Self::default();
        for pair in pairs(args) {
            match pair? {
                ("name", value) => config.name = value.to_string(),
                ("seed", value) => config.seed = Some(parse_value("seed", value)?),
                (key, _) => {
                    return Err(ConfigError::UnknownKey {
                        agent: "placer",
                        key: key.to_string(),
                    });
                }
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_args_give_defaults() {
        assert_eq!("".parse::<SliderConfig>(), Ok(SliderConfig::default()));
        assert_eq!("  ".parse::<PlacerConfig>(), Ok(PlacerConfig::default()));
    }

    #[test]
    fn parses_known_keys() {
        let slider: SliderConfig = "name=td alpha=0.01".parse().unwrap();
        assert_eq!(slider.name, "td");
        assert_eq!(slider.alpha, 0.01);
        let placer: PlacerConfig = "seed=42".parse().unwrap();
        assert_eq!(placer.seed, Some(42));
        assert_eq!(placer.name, "place");
    }

    #[test]
    fn rejects_unknown_keys() {
        assert_eq!(
            "seed=1".parse::<SliderConfig>(),
            Err(ConfigError::UnknownKey {
                agent: "slider",
                key: "seed".to_string()
            })
        );
    }

    #[test]
    fn rejects_bad_values_and_words() {
        assert_eq!(
            "seed=abc".parse::<PlacerConfig>(),
            Err(ConfigError::InvalidValue {
                key: "seed".to_string(),
                value: "abc".to_string()
            })
        );
        assert_eq!(
            "alpha".parse::<SliderConfig>(),
            Err(ConfigError::MalformedPair("alpha".to_string()))
        );
    }
}
