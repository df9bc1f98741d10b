// Formats de fichiers de topologie
//
// Format A (liste de liens) : une ligne par lien `R<u> R<v> <coût>`, u < v, trié par (u, v).
// Format B (matrice) : un entier N puis une matrice N×N de coûts, -1 = pas de lien.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{BufRead, Write};
use std::path::Path;
use log::{debug, warn};
use crate::error::{AppError, Result};
use crate::types::{Cost, Link, RouterId, Topology};

/// Format d'un fichier de topologie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    LinkList,
    Matrix,
}

impl FileFormat {
    /// Les fichiers `.mat` sont des matrices, tout le reste des listes de liens
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("mat") => FileFormat::Matrix,
            _ => FileFormat::LinkList,
        }
    }
}

/// Écrit les liens au format A ; `links` doit être trié avec `from < to` (cf. `NetworkGraph::edges`)
pub fn write_link_list<W: Write>(links: &[Link], writer: &mut W) -> Result<()> {
    for link in links {
        writeln!(writer, "R{} R{} {}", link.from, link.to, link.cost)?;
    }
    Ok(())
}

fn parse_router_token(token: &str) -> Option<RouterId> {
    if token.len() < 2 {
        return None;
    }
    token.strip_prefix('R')?.parse().ok()
}

fn parse_link_line(line: &str) -> Option<(RouterId, RouterId, Cost)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 3 {
        return None;
    }
    let a = parse_router_token(tokens[0])?;
    let b = parse_router_token(tokens[1])?;
    let cost = tokens[2].parse().ok()?;
    Some((a, b, cost))
}

/// Lit une liste de liens (format A). Les routeurs sont créés à partir des identifiants cités
/// puis renumérotés 1..N dans l'ordre croissant. Les lignes mal formées sont ignorées.
pub fn parse_link_list<R: BufRead>(mut reader: R) -> Result<Topology> {
    let mut raw_links = Vec::new();
    let mut ids = BTreeSet::new();
    let mut buffer = Vec::new();

    for index in 0usize.. {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        let line = match std::str::from_utf8(&buffer) {
            Ok(line) => line,
            Err(_) => {
                warn!("Ligne {} ignorée (UTF-8 invalide)", index + 1);
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_link_line(line) {
            Some((a, b, _)) if a == b => {
                warn!("Ligne {} ignorée (boucle sur R{}): {}", index + 1, a, line.trim());
            }
            Some((a, b, cost)) => {
                ids.insert(a);
                ids.insert(b);
                raw_links.push((a, b, cost));
            }
            None => warn!("Ligne {} mal formée ignorée: {}", index + 1, line.trim()),
        }
    }

    let renumbered: BTreeMap<RouterId, RouterId> = ids
        .iter()
        .enumerate()
        .map(|(position, &original)| (original, position + 1))
        .collect();

    let links = raw_links
        .into_iter()
        .map(|(a, b, cost)| Link::new(renumbered[&a], renumbered[&b], cost))
        .collect();

    debug!("Liste de liens lue: {} routeurs", renumbered.len());
    Ok(Topology {
        router_count: renumbered.len(),
        links,
    })
}

/// Écrit la topologie au format B
pub fn write_matrix<W: Write>(topology: &Topology, writer: &mut W) -> Result<()> {
    let n = topology.router_count;
    let mut matrix = vec![vec![-1i64; n]; n];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[i] = 0;
    }
    for link in &topology.links {
        let (u, v) = (link.from - 1, link.to - 1);
        matrix[u][v] = i64::from(link.cost);
        matrix[v][u] = i64::from(link.cost);
    }

    writeln!(writer, "{}", n)?;
    for row in &matrix {
        let line: Vec<String> = row.iter().map(|cost| cost.to_string()).collect();
        writeln!(writer, "{}", line.join(" "))?;
    }
    Ok(())
}

/// Lit une matrice de coûts (format B). Les deux sens sont symétrisés :
/// minimum si les deux sont positifs, sinon celui qui l'est, sinon pas de lien.
pub fn parse_matrix(content: &str) -> Result<Topology> {
    let mut tokens = content.split_whitespace();
    let n: usize = tokens
        .next()
        .ok_or_else(|| AppError::ParseError("empty matrix file".to_string()))?
        .parse()
        .map_err(|e| AppError::ParseError(format!("invalid router count: {}", e)))?;

    let expected = n
        .checked_mul(n)
        .ok_or_else(|| AppError::ParseError(format!("router count {} too large", n)))?;

    // Pas de pré-allocation : `n` vient du fichier
    let mut values = Vec::new();
    for position in 0..expected {
        let token = tokens.next().ok_or_else(|| AppError::ParseError(format!(
            "expected {} matrix values, found {}", expected, position
        )))?;
        let value: i64 = token
            .parse()
            .map_err(|e| AppError::ParseError(format!("invalid cost '{}': {}", token, e)))?;
        values.push(value);
    }
    if tokens.next().is_some() {
        warn!("Valeurs en trop après la matrice {}x{} ignorées", n, n);
    }

    let mut links = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let forward = values[i * n + j];
            let backward = values[j * n + i];
            let cost = match (forward >= 0, backward >= 0) {
                (true, true) => forward.min(backward),
                (true, false) => forward,
                (false, true) => backward,
                (false, false) => continue,
            };
            let cost = Cost::try_from(cost)
                .map_err(|_| AppError::ParseError(format!("cost {} out of range", cost)))?;
            links.push(Link { from: i + 1, to: j + 1, cost });
        }
    }

    Ok(Topology { router_count: n, links })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_list_is_renumbered() {
        let content = "R2 R5 4\nR5 R9 1\nR2 R9 10\n";
        let topology = parse_link_list(content.as_bytes()).unwrap();
        assert_eq!(topology.router_count, 3);
        assert_eq!(
            topology.links,
            vec![Link::new(1, 2, 4), Link::new(2, 3, 1), Link::new(1, 3, 10)]
        );
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let content = "R1 R2 5\n1 R3 4\nR R2 3\nR2 R3\nR3 R3 7\nR2 R3 -4\n\nR2 R3 6\n";
        let topology = parse_link_list(content.as_bytes()).unwrap();
        assert_eq!(topology.router_count, 3);
        assert_eq!(topology.links, vec![Link::new(1, 2, 5), Link::new(2, 3, 6)]);
    }

    #[test]
    fn test_write_link_list() {
        let links = vec![Link::new(1, 2, 5), Link::new(1, 3, 20), Link::new(2, 3, 5)];
        let mut out = Vec::new();
        write_link_list(&links, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "R1 R2 5\nR1 R3 20\nR2 R3 5\n");
    }

    #[test]
    fn test_matrix_is_symmetrized() {
        let content = "3\n0 4 -1\n6 0 -1\n-1 3 0\n";
        let topology = parse_matrix(content).unwrap();
        assert_eq!(topology.router_count, 3);
        assert_eq!(topology.links, vec![Link::new(1, 2, 4), Link::new(2, 3, 3)]);
    }

    #[test]
    fn test_truncated_matrix_is_rejected() {
        assert!(matches!(parse_matrix("3\n0 1 2\n"), Err(AppError::ParseError(_))));
        assert!(matches!(parse_matrix(""), Err(AppError::ParseError(_))));
        assert!(matches!(parse_matrix("2\n0 x\n1 0"), Err(AppError::ParseError(_))));
    }

    #[test]
    fn test_oversized_router_count_is_rejected() {
        assert!(matches!(parse_matrix("5000000000\n0 1\n"), Err(AppError::ParseError(_))));
        assert!(matches!(parse_matrix("3000000\n0 1\n"), Err(AppError::ParseError(_))));
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let mut content = b"R1 R2 5\n".to_vec();
        content.extend_from_slice(b"R\xff R3 4\n");
        content.extend_from_slice(b"R2 R3 6\n");

        let topology = parse_link_list(content.as_slice()).unwrap();
        assert_eq!(topology.router_count, 3);
        assert_eq!(topology.links, vec![Link::new(1, 2, 5), Link::new(2, 3, 6)]);
    }

    #[test]
    fn test_write_matrix() {
        let topology = Topology {
            router_count: 3,
            links: vec![Link::new(1, 3, 8)],
        };
        let mut out = Vec::new();
        write_matrix(&topology, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "3\n0 -1 8\n-1 0 -1\n8 -1 0\n");
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("data/network_1.txt")), FileFormat::LinkList);
        assert_eq!(FileFormat::from_path(Path::new("backbone.MAT")), FileFormat::Matrix);
        assert_eq!(FileFormat::from_path(Path::new("noext")), FileFormat::LinkList);
    }
}
