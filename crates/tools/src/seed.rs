use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Where the assembly seed came from, reported alongside every run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    ConfigFile(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::ConfigFile(seed) | Self::Generated(seed) => seed,
        }
    }

    pub fn origin(self) -> &'static str {
        match self {
            Self::Cli(_) => "command line",
            Self::ConfigFile(_) => "config file",
            Self::Generated(_) => "generated",
        }
    }
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(std::process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

/// Command line wins over the config file; a generated seed fills in otherwise.
pub fn resolve_seed(cli: Option<u64>, config_file: Option<u64>, generated: u64) -> SeedChoice {
    match (cli, config_file) {
        (Some(seed), _) => SeedChoice::Cli(seed),
        (None, Some(seed)) => SeedChoice::ConfigFile(seed),
        (None, None) => SeedChoice::Generated(generated),
    }
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_seed_beats_config_file() {
        assert_eq!(resolve_seed(Some(4_242), Some(7), 1), SeedChoice::Cli(4_242));
    }

    #[test]
    fn config_file_seed_beats_generated() {
        assert_eq!(resolve_seed(None, Some(2_026), 1), SeedChoice::ConfigFile(2_026));
    }

    #[test]
    fn falls_back_to_generated_seed() {
        let choice = resolve_seed(None, None, 9_876_543);
        assert_eq!(choice, SeedChoice::Generated(9_876_543));
        assert_eq!(choice.value(), 9_876_543);
        assert_eq!(choice.origin(), "generated");
    }

    #[test]
    fn generated_seed_changes_between_calls() {
        let first = generate_runtime_seed();
        let second = generate_runtime_seed();
        assert_ne!(first, second, "runtime seed generation should vary per call");
    }
}
