use std::env;
use std::error::Error as StdError;
use std::path::Path;
use std::process;

use routing_simulator::display::{format_cost_matrix, format_links, format_route, format_routing_tables, format_tables_json};
use routing_simulator::init::init_logging;
use routing_simulator::read_config::read_simulator_config;
use routing_simulator::storage::{load_network, save_network};
use routing_simulator::{AppError, Result, RouterId, RoutingEngine};

fn help(program: &str) {
    eprintln!("Usage: {} <fichier> <commande>", program);
    eprintln!("Commandes disponibles:");
    eprintln!("  links              - Affiche les liens de chaque routeur");
    eprintln!("  matrix             - Affiche la matrice des coûts minimaux");
    eprintln!("  tables             - Affiche toutes les tables de routage");
    eprintln!("  route <src> <dst>  - Affiche la route la plus courte entre deux routeurs");
    eprintln!("  json               - Exporte les tables de routage en JSON");
    eprintln!("  convert <sortie>   - Réécrit le réseau (.mat = matrice, sinon liste de liens)");
}

fn parse_id(arg: Option<&String>) -> Option<RouterId> {
    arg.and_then(|value| value.parse().ok())
}

fn execute(engine: &RoutingEngine, command: &str, args: &[String]) -> Result<Option<String>> {
    let output = match command {
        "links" => format_links(engine),
        "matrix" => format_cost_matrix(engine),
        "tables" => format_routing_tables(engine),
        "route" => match (parse_id(args.first()), parse_id(args.get(1))) {
            (Some(source), Some(destination)) => format_route(engine, source, destination)?,
            _ => return Ok(None),
        },
        "json" => format_tables_json(engine)?,
        "convert" => match args.first() {
            Some(output) => {
                save_network(engine, Path::new(output))?;
                format!("Réseau écrit dans: {}\n", output)
            }
            None => return Ok(None),
        },
        _ => return Ok(None),
    };
    Ok(Some(output))
}

fn main() -> std::result::Result<(), Box<dyn StdError>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        help(&args[0]);
        process::exit(1);
    }

    let config = read_simulator_config()?;
    init_logging(&config);

    let engine = load_network(Path::new(&args[1]), config.engine_options())?;
    match execute(&engine, &args[2], &args[3..]) {
        Ok(Some(output)) => print!("{}", output),
        Ok(None) => {
            eprintln!("Commande inconnue ou incomplète: {}", args[2..].join(" "));
            help(&args[0]);
            process::exit(1);
        }
        Err(e @ AppError::InvalidId(_)) => {
            eprintln!("{}", e);
            process::exit(2);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
