use crate::core::potentials::Potential;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Pair potential {0} does not act on two atoms")]
    InvalidPairPotential(Potential),
    #[error("Parameter '{name}' must not be negative (got {value})")]
    Negative { name: &'static str, value: i64 },
    #[error("Parameter '{0}' must not be empty")]
    Empty(&'static str),
}

/// Document-wide settings: the default pair potential, output formatting, and
/// the values written into the declarative sections of a new document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TopologyConfig {
    /// Potential applied to pairs that carry none of their own.
    pub pair_potential: Potential,
    /// Rewrite scientific numbers as `0.XXXXE±NN` when saving.
    pub fortran_notation: bool,
    pub nbfunc: i64,
    pub comb_rule: i64,
    pub gen_pairs: String,
    pub molecule_name: String,
    pub nrexcl: i64,
    pub system_name: String,
    pub molecule_count: i64,
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            pair_potential: Potential::LennardJones,
            fortran_notation: true,
            nbfunc: 1,
            comb_rule: 1,
            gen_pairs: "no".to_string(),
            molecule_name: "Macromolecule".to_string(),
            nrexcl: 3,
            system_name: "Macromolecule".to_string(),
            molecule_count: 1,
        }
    }
}

impl TopologyConfig {
    pub fn builder() -> TopologyConfigBuilder {
        TopologyConfigBuilder::new()
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<string>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: origin.to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pair_potential.arity() != 2 {
            return Err(ConfigError::InvalidPairPotential(self.pair_potential));
        }
        for (name, value) in [
            ("nrexcl", self.nrexcl),
            ("molecule-count", self.molecule_count),
        ] {
            if value < 0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        for (name, value) in [
            ("molecule-name", &self.molecule_name),
            ("system-name", &self.system_name),
            ("gen-pairs", &self.gen_pairs),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(name));
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct TopologyConfigBuilder {
    pair_potential: Option<Potential>,
    fortran_notation: Option<bool>,
    nbfunc: Option<i64>,
    comb_rule: Option<i64>,
    gen_pairs: Option<String>,
    molecule_name: Option<String>,
    nrexcl: Option<i64>,
    system_name: Option<String>,
    molecule_count: Option<i64>,
}

impl TopologyConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pair_potential(mut self, potential: Potential) -> Self {
        self.pair_potential = Some(potential);
        self
    }
    pub fn fortran_notation(mut self, enabled: bool) -> Self {
        self.fortran_notation = Some(enabled);
        self
    }
    pub fn nbfunc(mut self, nbfunc: i64) -> Self {
        self.nbfunc = Some(nbfunc);
        self
    }
    pub fn comb_rule(mut self, comb_rule: i64) -> Self {
        self.comb_rule = Some(comb_rule);
        self
    }
    pub fn gen_pairs(mut self, gen_pairs: impl Into<String>) -> Self {
        self.gen_pairs = Some(gen_pairs.into());
        self
    }
    pub fn molecule_name(mut self, name: impl Into<String>) -> Self {
        self.molecule_name = Some(name.into());
        self
    }
    pub fn nrexcl(mut self, nrexcl: i64) -> Self {
        self.nrexcl = Some(nrexcl);
        self
    }
    pub fn system_name(mut self, name: impl Into<String>) -> Self {
        self.system_name = Some(name.into());
        self
    }
    pub fn molecule_count(mut self, count: i64) -> Self {
        self.molecule_count = Some(count);
        self
    }

    /// Fills unset parameters from [`TopologyConfig::default`] and validates the result.
    pub fn build(self) -> Result<TopologyConfig, ConfigError> {
        let defaults = TopologyConfig::default();
        let config = TopologyConfig {
            pair_potential: self.pair_potential.unwrap_or(defaults.pair_potential),
            fortran_notation: self.fortran_notation.unwrap_or(defaults.fortran_notation),
            nbfunc: self.nbfunc.unwrap_or(defaults.nbfunc),
            comb_rule: self.comb_rule.unwrap_or(defaults.comb_rule),
            gen_pairs: self.gen_pairs.unwrap_or(defaults.gen_pairs),
            molecule_name: self.molecule_name.unwrap_or(defaults.molecule_name),
            nrexcl: self.nrexcl.unwrap_or(defaults.nrexcl),
            system_name: self.system_name.unwrap_or(defaults.system_name),
            molecule_count: self.molecule_count.unwrap_or(defaults.molecule_count),
        };
        config.validate()?;
        Ok(config)
    }
}
