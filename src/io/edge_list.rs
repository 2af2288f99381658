//! The serialized edge-list format.
//!
//! The first non-blank line declares the modes, `{weighted|unweighted}
//! {directed|undirected}`. Every following non-blank line is one record:
//! a lone token adds an isolated vertex, two tokens an unweighted edge and
//! three tokens a weighted edge whose last token must parse as an integer.
//! Record arity has to match the declared weightedness. Vertices mentioned
//! only by an edge record are added on the fly.

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::debug;

/// Reads a graph from its edge-list form.
///
/// Fails with [`GraphError::MalformedInput`] carrying the 1-based line
/// number of the offending line; duplicate vertex or edge records surface
/// as the corresponding graph error instead.
pub fn parse<R: BufRead>(reader: R) -> Result<Graph> {
    let mut graph: Option<Graph> = None;
    let mut line_no = 0;
    for line in reader.lines() {
        let line = line?;
        line_no += 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        match graph.as_mut() {
            None => graph = Some(parse_header(line_no, &tokens)?),
            Some(graph) => parse_record(graph, line_no, &tokens)?,
        }
    }
    match graph {
        Some(graph) => {
            debug!(
                vertices = graph.vertex_size(),
                edges = graph.edge_size(),
                "edge list loaded"
            );
            Ok(graph)
        }
        None => Err(GraphError::malformed(1, "missing header line")),
    }
}

/// [`parse`] applied to a file on disk.
pub fn load(path: impl AsRef<Path>) -> Result<Graph> {
    parse(BufReader::new(File::open(path)?))
}

/// Writes the graph back out in the form [`parse`] accepts: header, edge
/// records matching the weighted mode, then one line per isolated vertex.
pub fn write<W: Write>(graph: &Graph, writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        "{} {}",
        if graph.is_weighted() { "weighted" } else { "unweighted" },
        if graph.is_directed() { "directed" } else { "undirected" },
    )?;
    for (key, weight) in graph.iter_edges() {
        if graph.is_weighted() {
            writeln!(writer, "{} {} {}", key.tail, key.head, weight)?;
        } else {
            writeln!(writer, "{} {}", key.tail, key.head)?;
        }
    }
    for vertex in graph.iter_vertices() {
        let id = vertex.as_str();
        if graph.outbound_size(id) == 0 && graph.inbound_size(id) == 0 {
            writeln!(writer, "{}", vertex)?;
        }
    }
    Ok(())
}

fn parse_header(line_no: usize, tokens: &[&str]) -> Result<Graph> {
    if tokens.len() != 2 {
        return Err(GraphError::malformed(
            line_no,
            "header must be `{weighted|unweighted} {directed|undirected}`",
        ));
    }
    let weighted = match tokens[0] {
        "weighted" => true,
        "unweighted" => false,
        other => {
            return Err(GraphError::malformed(
                line_no,
                format!("expected `weighted` or `unweighted`, got `{}`", other),
            ))
        }
    };
    let directed = match tokens[1] {
        "directed" => true,
        "undirected" => false,
        other => {
            return Err(GraphError::malformed(
                line_no,
                format!("expected `directed` or `undirected`, got `{}`", other),
            ))
        }
    };
    Ok(Graph::with_modes(weighted, directed))
}

fn parse_record(graph: &mut Graph, line_no: usize, tokens: &[&str]) -> Result<()> {
    match tokens {
        [vertex] => graph.add_vertex(*vertex),
        [tail, head] => {
            if graph.is_weighted() {
                return Err(GraphError::malformed(
                    line_no,
                    "weighted graph, expected `tail head weight`",
                ));
            }
            ensure_vertex(graph, tail)?;
            ensure_vertex(graph, head)?;
            graph.add_edge((*tail, *head), None)
        }
        [tail, head, weight] => {
            if !graph.is_weighted() {
                return Err(GraphError::malformed(
                    line_no,
                    "unweighted graph, expected `tail head`",
                ));
            }
            let weight = weight.parse().map_err(|_| {
                GraphError::malformed(line_no, format!("weight `{}` is not an integer", weight))
            })?;
            ensure_vertex(graph, tail)?;
            ensure_vertex(graph, head)?;
            graph.add_edge((*tail, *head), Some(weight))
        }
        _ => Err(GraphError::malformed(
            line_no,
            "a record has one, two or three tokens",
        )),
    }
}

fn ensure_vertex(graph: &mut Graph, id: &str) -> Result<()> {
    if !graph.contains_vertex(id) {
        graph.add_vertex(id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_weighted_undirected_file() {
        let input = "weighted undirected\na b 3\nb c 4\nlonely\n";
        let g = parse(input.as_bytes()).unwrap();
        assert!(!g.is_directed());
        assert!(g.is_weighted());
        assert_eq!(g.vertex_size(), 4);
        assert_eq!(g.edge_size(), 2);
        assert_eq!(g.weight(("b", "a")).unwrap(), 3);
        assert_eq!(g.neighbour_count("lonely"), 0);
    }

    #[test]
    fn parses_an_unweighted_directed_file() {
        let input = "unweighted directed\na b\nb a\n";
        let g = parse(input.as_bytes()).unwrap();
        assert!(g.is_directed());
        assert!(!g.is_weighted());
        assert_eq!(g.edge_size(), 2);
        assert!(g.is_edge("a", "b"));
        assert!(g.is_edge("b", "a"));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let input = "\n\nweighted undirected\n\na b 1\n   \n";
        let g = parse(input.as_bytes()).unwrap();
        assert_eq!(g.edge_size(), 1);
    }

    #[test]
    fn missing_or_bad_headers_fail() {
        assert!(matches!(
            parse("".as_bytes()).unwrap_err(),
            GraphError::MalformedInput { line: 1, .. }
        ));
        assert!(matches!(
            parse("weighted\na b 1\n".as_bytes()).unwrap_err(),
            GraphError::MalformedInput { line: 1, .. }
        ));
        assert!(matches!(
            parse("heavy undirected\n".as_bytes()).unwrap_err(),
            GraphError::MalformedInput { line: 1, .. }
        ));
        assert!(matches!(
            parse("weighted sideways\n".as_bytes()).unwrap_err(),
            GraphError::MalformedInput { line: 1, .. }
        ));
    }

    #[test]
    fn record_arity_must_match_the_header() {
        let err = parse("weighted undirected\na b\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { line: 2, .. }));

        let err = parse("unweighted undirected\na b 3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { line: 2, .. }));

        let err = parse("weighted undirected\na b 3 extra\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { line: 2, .. }));
    }

    #[test]
    fn weights_must_be_integers() {
        let err = parse("weighted undirected\na b 1\nb c fast\n".as_bytes()).unwrap_err();
        match err {
            GraphError::MalformedInput { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("fast"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn duplicate_records_surface_as_graph_errors() {
        let err = parse("weighted undirected\na b 1\nb a 2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateEdge(_)));

        let err = parse("weighted undirected\nv\nv\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateVertex(_)));
    }

    #[test]
    fn negative_weights_parse() {
        let g = parse("weighted undirected\na b -5\n".as_bytes()).unwrap();
        assert_eq!(g.weight(("a", "b")).unwrap(), -5);
    }

    #[test]
    fn written_output_parses_back() {
        let input = "weighted directed\na b 3\nb a 4\nc a 1\nlonely\n";
        let g = parse(input.as_bytes()).unwrap();
        let mut buffer = Vec::new();
        write(&g, &mut buffer).unwrap();
        let reparsed = parse(buffer.as_slice()).unwrap();
        assert_eq!(reparsed.to_string(), g.to_string());
        assert_eq!(reparsed.vertices(), g.vertices());
    }

    #[test]
    fn unweighted_graphs_write_two_token_records() {
        let g = parse("unweighted undirected\na b\n".as_bytes()).unwrap();
        let mut buffer = Vec::new();
        write(&g, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "unweighted undirected\na b\n"
        );
    }
}
