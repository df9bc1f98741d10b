use std::error::Error as StdError;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use log::{info, error};
use rand::rngs::StdRng;

use routing_simulator::display::{format_cost_matrix, format_links, format_route, format_routing_tables};
use routing_simulator::init::{init_logging, init_rng};
use routing_simulator::read_config::{read_simulator_config, SimulatorConfig};
use routing_simulator::storage::{list_saved_networks, load_network, next_network_path, save_network};
use routing_simulator::{AppError, Result, RouterId, RoutingEngine};

fn menu() {
    println!("\n=========================================");
    println!("||   SIMULATEUR DE RÉSEAU DE ROUTEURS   ||");
    println!("=========================================");
    println!("1. Afficher le réseau");
    println!("2. Calculer la route la plus courte");
    println!("3. Ajouter un routeur");
    println!("4. Supprimer un routeur");
    println!("5. Ajouter un lien");
    println!("6. Supprimer un lien");
    println!("7. Sauvegarder le réseau");
    println!("8. Afficher les tables de routage");
    println!("9. Quitter");
    println!("=========================================");
}

/// Affiche `message` et lit une ligne ; `None` en fin d'entrée
fn prompt(message: &str) -> io::Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

fn prompt_number<T: FromStr>(message: &str) -> io::Result<Option<T>> {
    loop {
        match prompt(message)? {
            None => return Ok(None),
            Some(answer) => match answer.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => println!("Entrée invalide, veuillez réessayer."),
            },
        }
    }
}

fn prompt_yes(message: &str) -> io::Result<bool> {
    Ok(matches!(prompt(message)?.as_deref(), Some("o") | Some("O")))
}

/// Affiche une erreur récupérable ; une violation d'invariant interrompt le programme
fn report(result: Result<()>) -> Result<()> {
    match result {
        Err(e @ AppError::InvariantViolation(_)) => Err(e),
        Err(e) => {
            println!("Erreur: {}", e);
            Ok(())
        }
        Ok(()) => Ok(()),
    }
}

/// Demande à l'utilisateur où sauvegarder : nouveau fichier ou écrasement d'un fichier existant
fn choose_save_path(data_dir: &Path) -> Result<Option<PathBuf>> {
    println!("\nComment sauvegarder le réseau ?");
    println!("1. Créer un nouveau fichier");
    println!("2. Écraser un fichier existant");
    match prompt_number::<u32>("Choix: ")? {
        Some(1) => {
            let path = next_network_path(data_dir)?;
            println!("Le réseau sera sauvegardé dans: {}", path.display());
            Ok(Some(path))
        }
        Some(2) => {
            let saved = list_saved_networks(data_dir)?;
            if saved.is_empty() {
                println!("Aucun fichier existant, création d'un nouveau fichier.");
                return Ok(Some(next_network_path(data_dir)?));
            }
            print_saved(&saved);
            let choice = prompt_number::<usize>("Numéro du fichier à écraser: ")?;
            match choice.and_then(|index| index.checked_sub(1)).and_then(|index| saved.get(index)) {
                Some(path) => {
                    if prompt_yes(&format!("Écraser '{}' ? (o/n): ", path.display()))? {
                        Ok(Some(path.clone()))
                    } else {
                        println!("Opération annulée.");
                        Ok(None)
                    }
                }
                None => {
                    println!("Choix invalide. Opération annulée.");
                    Ok(None)
                }
            }
        }
        _ => {
            println!("Choix invalide. Opération annulée.");
            Ok(None)
        }
    }
}

fn print_saved(saved: &[PathBuf]) {
    println!("\nRéseaux disponibles:");
    for (index, path) in saved.iter().enumerate() {
        println!("  [{}] {}", index + 1, path.display());
    }
}

fn save(engine: &RoutingEngine, config: &SimulatorConfig) -> Result<()> {
    if let Some(path) = choose_save_path(&config.data_dir)? {
        save_network(engine, &path)?;
        println!("Réseau sauvegardé dans: {}", path.display());
    }
    Ok(())
}

/// Charge un réseau sauvegardé ou en génère un nouveau
fn startup(config: &SimulatorConfig, rng: &mut StdRng) -> Result<Option<RoutingEngine>> {
    let wants_load = matches!(
        prompt("Charger un réseau existant ou en créer un nouveau ? (c/n): ")?.as_deref(),
        Some("c") | Some("C")
    );

    if wants_load {
        let saved = list_saved_networks(&config.data_dir)?;
        if saved.is_empty() {
            println!("Aucun réseau sauvegardé. Un nouveau réseau va être créé.");
        } else {
            print_saved(&saved);
            let choice = prompt_number::<usize>("Numéro du réseau à charger: ")?;
            return match choice.and_then(|index| index.checked_sub(1)).and_then(|index| saved.get(index)) {
                Some(path) => {
                    let engine = load_network(path, config.engine_options())?;
                    println!("Réseau chargé depuis: {}", path.display());
                    Ok(Some(engine))
                }
                None => {
                    println!("Choix invalide. Fin du programme.");
                    Ok(None)
                }
            };
        }
    }

    let count = match prompt_number::<usize>("Nombre de routeurs du nouveau réseau: ")? {
        Some(count) => count,
        None => return Ok(None),
    };
    let mut engine = RoutingEngine::with_routers(count, config.engine_options())?;
    engine.generate_random_topology(rng, config.cost_range())?;
    println!("Réseau aléatoire (complètement connecté) généré.");

    if prompt_yes("Sauvegarder ce réseau ? (o/n): ")? {
        report(save(&engine, config))?;
    }
    Ok(Some(engine))
}

fn read_pair(first: &str, second: &str) -> io::Result<Option<(RouterId, RouterId)>> {
    let a = match prompt_number(first)? {
        Some(a) => a,
        None => return Ok(None),
    };
    Ok(prompt_number(second)?.map(|b| (a, b)))
}

fn run(config: &SimulatorConfig, rng: &mut StdRng) -> Result<()> {
    let mut engine = match startup(config, rng)? {
        Some(engine) => engine,
        None => return Ok(()),
    };

    loop {
        menu();
        let choice = match prompt_number::<u32>("Sélectionnez une option: ")? {
            Some(choice) => choice,
            None => break,
        };

        match choice {
            1 => {
                print!("{}", format_links(&engine));
                print!("{}", format_cost_matrix(&engine));
            }
            2 => {
                if let Some((source, destination)) = read_pair("Routeur origine: ", "Routeur destination: ")? {
                    report(format_route(&engine, source, destination).map(|route| print!("{}", route)))?;
                }
            }
            3 => {
                report(engine.add_router().map(|id| println!("Routeur R{} ajouté.", id)))?;
            }
            4 => {
                if let Some(id) = prompt_number::<RouterId>("Identifiant du routeur à supprimer: ")? {
                    report(engine.remove_router(id).map(|()| println!("Routeur R{} supprimé.", id)))?;
                }
            }
            5 => {
                if let Some((u, v)) = read_pair("Premier routeur: ", "Second routeur: ")? {
                    if let Some(cost) = prompt_number("Coût du lien: ")? {
                        report(engine.add_or_update_link(u, v, cost).map(|()| {
                            println!("Lien ajouté entre R{} et R{}.", u, v)
                        }))?;
                    }
                }
            }
            6 => {
                if let Some((u, v)) = read_pair("Premier routeur: ", "Second routeur: ")? {
                    report(engine.remove_link(u, v).map(|removed| {
                        if removed {
                            println!("Lien supprimé entre R{} et R{}.", u, v);
                        } else {
                            println!("Aucun lien entre R{} et R{}.", u, v);
                        }
                    }))?;
                }
            }
            7 => report(save(&engine, config))?,
            8 => print!("{}", format_routing_tables(&engine)),
            9 => {
                println!("Au revoir!");
                break;
            }
            _ => println!("Option invalide."),
        }
    }
    Ok(())
}

/// Point d'entrée principal du programme
fn main() -> std::result::Result<(), Box<dyn StdError>> {
    let config = read_simulator_config()?;
    init_logging(&config);
    info!("Dossier des réseaux: {}", config.data_dir.display());

    let mut rng = init_rng(&config);
    if let Err(e) = run(&config, &mut rng) {
        error!("Arrêt du simulateur: {}", e);
        return Err(e.into());
    }
    Ok(())
}
