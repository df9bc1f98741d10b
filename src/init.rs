use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::read_config::SimulatorConfig;

/// Initialise le logger ; `RUST_LOG` prime sur le niveau configuré
pub fn init_logging(config: &SimulatorConfig) {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", &config.log_level);
    }
    env_logger::init();
}

/// Générateur aléatoire : graine fixe si configurée, sinon entropie du système
pub fn init_rng(config: &SimulatorConfig) -> StdRng {
    match config.seed {
        Some(seed) => {
            log::info!("Générateur aléatoire initialisé avec la graine {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}
