use crate::error::{GraphError, Result};
use crate::graph::Vertex;
use ahash::RandomState;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Vertex positions for the A* heuristic, loaded from a CSV of
/// `vertexId,x,y` rows behind one header line.
#[derive(Debug, Clone, Default)]
pub struct CoordinateTable {
    positions: HashMap<Vertex, (f64, f64), RandomState>,
}

impl CoordinateTable {
    pub fn new() -> Self {
        Self {
            positions: HashMap::with_hasher(RandomState::new()),
        }
    }

    /// Reads the CSV. The first non-blank line is the header and is not
    /// interpreted; later rows need exactly three comma-separated fields
    /// with float coordinates. A repeated vertex keeps its last row.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::new();
        let mut seen_header = false;
        let mut line_no = 0;
        for line in reader.lines() {
            let line = line?;
            line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            if !seen_header {
                seen_header = true;
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            match fields.as_slice() {
                [id, x, y] => {
                    let x = parse_float(line_no, x)?;
                    let y = parse_float(line_no, y)?;
                    table.insert(*id, x, y);
                }
                _ => {
                    return Err(GraphError::malformed(
                        line_no,
                        "a coordinate row is `vertexId,x,y`",
                    ))
                }
            }
        }
        Ok(table)
    }

    /// [`CoordinateTable::parse`] applied to a file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::parse(BufReader::new(File::open(path)?))
    }

    pub fn insert(&mut self, vertex: impl Into<Vertex>, x: f64, y: f64) {
        self.positions.insert(vertex.into(), (x, y));
    }

    /// Fails with [`GraphError::UnknownVertex`] for a vertex without a row.
    pub fn get(&self, vertex: &Vertex) -> Result<(f64, f64)> {
        self.positions
            .get(vertex.as_str())
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(vertex.clone()))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

fn parse_float(line_no: usize, field: &str) -> Result<f64> {
    field.parse().map_err(|_| {
        GraphError::malformed(line_no, format!("`{}` is not a coordinate", field))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_behind_a_header() {
        let input = "id,x,y\na,0.0,0.0\nb,1.5,-2.25\n\nc, 3 , 4 \n";
        let table = CoordinateTable::parse(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(&Vertex::from("b")).unwrap(), (1.5, -2.25));
        assert_eq!(table.get(&Vertex::from("c")).unwrap(), (3.0, 4.0));
    }

    #[test]
    fn header_only_means_empty() {
        let table = CoordinateTable::parse("id,x,y\n".as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn missing_vertex_is_an_error() {
        let table = CoordinateTable::parse("id,x,y\na,1,2\n".as_bytes()).unwrap();
        assert!(matches!(
            table.get(&Vertex::from("z")).unwrap_err(),
            GraphError::UnknownVertex(v) if v.as_str() == "z"
        ));
    }

    #[test]
    fn malformed_rows_carry_their_line() {
        let err = CoordinateTable::parse("id,x,y\na,1,2\nb,oops,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { line: 3, .. }));

        let err = CoordinateTable::parse("id,x,y\nb,1\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GraphError::MalformedInput { line: 2, .. }));
    }

    #[test]
    fn a_repeated_vertex_keeps_the_last_row() {
        let input = "id,x,y\na,1,1\na,9,9\n";
        let table = CoordinateTable::parse(input.as_bytes()).unwrap();
        assert_eq!(table.get(&Vertex::from("a")).unwrap(), (9.0, 9.0));
    }
}
