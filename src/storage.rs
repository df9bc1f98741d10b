// Réseaux sauvegardés : fichiers `network_<k>.txt` dans le dossier de données,
// et lecture/écriture d'un moteur vers un fichier de topologie.
// Chaque sauvegarde est inscrite une seule fois dans le registre `saved_networks.lst`
// du dossier du fichier.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use log::{debug, info, warn};
use crate::core::{EngineOptions, RoutingEngine};
use crate::error::Result;
use crate::topology_file::{self, FileFormat};
use crate::types::Topology;

const NETWORK_PREFIX: &str = "network_";
const NETWORK_EXTENSION: &str = "txt";
pub const REGISTRY_FILE: &str = "saved_networks.lst";

pub fn network_file_name(index: usize) -> String {
    format!("{}{}.{}", NETWORK_PREFIX, index, NETWORK_EXTENSION)
}

/// Nombre de fichiers `network_*.txt` du dossier (créé s'il n'existe pas)
pub fn count_saved_networks(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        return Ok(0);
    }
    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_network = path.is_file()
            && path.extension().and_then(|ext| ext.to_str()) == Some(NETWORK_EXTENSION)
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .map_or(false, |name| name.starts_with(NETWORK_PREFIX));
        if is_network {
            count += 1;
        }
    }
    Ok(count)
}

/// Réseaux `network_1.txt` .. `network_k.txt` existants, dans l'ordre
pub fn list_saved_networks(dir: &Path) -> Result<Vec<PathBuf>> {
    let count = count_saved_networks(dir)?;
    Ok((1..=count)
        .map(|index| dir.join(network_file_name(index)))
        .filter(|path| path.is_file())
        .collect())
}

/// Chemin du prochain fichier libre pour une nouvelle sauvegarde
pub fn next_network_path(dir: &Path) -> Result<PathBuf> {
    let count = count_saved_networks(dir)?;
    Ok(dir.join(network_file_name(count + 1)))
}

/// Lit un fichier de topologie ; le format dépend de l'extension
pub fn load_topology(path: &Path) -> Result<Topology> {
    match FileFormat::from_path(path) {
        FileFormat::LinkList => {
            let file = File::open(path)?;
            topology_file::parse_link_list(BufReader::new(file))
        }
        FileFormat::Matrix => {
            let content = fs::read_to_string(path)?;
            topology_file::parse_matrix(&content)
        }
    }
}

/// Construit un moteur depuis un fichier. En cas d'erreur, rien n'est modifié.
pub fn load_network(path: &Path, options: EngineOptions) -> Result<RoutingEngine> {
    let topology = load_topology(path)?;
    let engine = RoutingEngine::from_topology(&topology, options)?;
    info!("Réseau chargé depuis: {}", path.display());
    Ok(engine)
}

/// Sauvegarde la topologie du moteur ; le format dépend de l'extension
pub fn save_network(engine: &RoutingEngine, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    match FileFormat::from_path(path) {
        FileFormat::LinkList => topology_file::write_link_list(&engine.links(), &mut writer)?,
        FileFormat::Matrix => topology_file::write_matrix(&engine.snapshot(), &mut writer)?,
    }
    writer.flush()?;
    info!("Réseau sauvegardé dans: {}", path.display());

    // La sauvegarde est faite : un registre illisible ne la fait pas échouer
    if let Err(e) = register_saved_network(path) {
        warn!("Registre des sauvegardes non mis à jour: {}", e);
    }
    Ok(())
}

fn registry_path(dir: &Path) -> PathBuf {
    dir.join(REGISTRY_FILE)
}

/// Noms de fichiers inscrits dans le registre du dossier, dans l'ordre d'inscription
pub fn registered_networks(dir: &Path) -> Result<Vec<String>> {
    let registry = registry_path(dir);
    if !registry.is_file() {
        return Ok(Vec::new());
    }
    let content = fs::read(&registry)?;
    Ok(String::from_utf8_lossy(&content)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect())
}

/// Ajoute le nom du fichier au registre de son dossier s'il n'y figure pas déjà
fn register_saved_network(path: &Path) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => return Ok(()),
    };
    if registered_networks(dir)?.contains(&name) {
        debug!("{} déjà inscrit au registre", name);
        return Ok(());
    }
    let mut registry = OpenOptions::new().create(true).append(true).open(registry_path(dir))?;
    writeln!(registry, "{}", name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_creates_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("data");
        assert_eq!(list_saved_networks(&dir).unwrap(), Vec::<PathBuf>::new());
        assert!(dir.is_dir());
        assert_eq!(next_network_path(&dir).unwrap(), dir.join("network_1.txt"));
    }

    #[test]
    fn test_listing_ignores_other_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        fs::write(dir.join("network_1.txt"), "R1 R2 3\n").unwrap();
        fs::write(dir.join("network_2.txt"), "").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();
        fs::write(dir.join("network_3.mat"), "0").unwrap();

        let networks = list_saved_networks(dir).unwrap();
        assert_eq!(networks, vec![dir.join("network_1.txt"), dir.join("network_2.txt")]);
        assert_eq!(next_network_path(dir).unwrap(), dir.join("network_3.txt"));
    }

    #[test]
    fn test_saved_paths_are_registered_once() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("data");
        let mut engine = RoutingEngine::with_routers(2, EngineOptions::default()).unwrap();
        engine.add_or_update_link(1, 2, 3).unwrap();

        assert!(registered_networks(&dir).unwrap().is_empty());
        let first = next_network_path(&dir).unwrap();
        save_network(&engine, &first).unwrap();
        save_network(&engine, &first).unwrap();
        save_network(&engine, &dir.join("backbone.mat")).unwrap();

        assert_eq!(registered_networks(&dir).unwrap(), vec!["network_1.txt", "backbone.mat"]);
        // Le registre n'est pas compté comme un réseau sauvegardé
        assert_eq!(next_network_path(&dir).unwrap(), dir.join("network_2.txt"));
    }
}
