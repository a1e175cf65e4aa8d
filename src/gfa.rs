//! Reading and writing graphs in GFA 1.0.
//!
//! Only `S` and `L` records carry information for the sequence graph. Every `L`
//! record becomes exactly one directed edge `(from, orient) -> (to, orient)`;
//! the implied reverse-strand edge is not added. Overlaps are ignored on input
//! and written as `0M`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::bidirected_graph::{OrientedNode, SequenceGraph};
use crate::error::{GraphError, Result};

/// A loaded graph together with the GFA names of its segments.
#[derive(Debug, Clone, Default)]
pub struct GfaGraph {
    pub graph: SequenceGraph,
    /// Segment index -> GFA segment name.
    pub names: Vec<String>,
}

impl GfaGraph {
    pub fn name(&self, segment: usize) -> Option<&str> {
        self.names.get(segment).map(String::as_str)
    }

    /// `name+` / `name-` for an oriented node, falling back to its index.
    pub fn describe(&self, node: OrientedNode) -> String {
        match self.name(node.segment()) {
            Some(name) => format!("{}{}", name, node.orientation_char()),
            None => node.to_string(),
        }
    }
}

fn parse_orientation(field: &str, line: usize) -> Result<bool> {
    match field {
        "+" => Ok(false),
        "-" => Ok(true),
        other => Err(GraphError::gfa(
            line,
            format!("orientation must be '+' or '-', got {:?}", other),
        )),
    }
}

/// Parse a GFA stream.
///
/// Segments are registered in file order before any link is applied, so links
/// may precede the segments they reference. Sequences are upper-cased before
/// validation.
pub fn parse_gfa<R: BufRead>(reader: R) -> Result<GfaGraph> {
    let mut gfa = GfaGraph::default();
    let mut index: HashMap<String, usize> = HashMap::new();
    // (line number, from, from orientation, to, to orientation)
    let mut links: Vec<(usize, String, bool, String, bool)> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let line = line.trim_end_matches('\r');
        let fields: Vec<&str> = line.split('\t').collect();

        match fields[0] {
            "S" => {
                if fields.len() < 3 {
                    return Err(GraphError::gfa(line_no, "S record needs a name and a sequence"));
                }
                let name = fields[1];
                if index.contains_key(name) {
                    return Err(GraphError::gfa(
                        line_no,
                        format!("duplicate segment name {:?}", name),
                    ));
                }
                let sequence = fields[2].to_ascii_uppercase();
                let segment = gfa
                    .graph
                    .add_segment(&sequence)
                    .map_err(|e| GraphError::gfa(line_no, format!("segment {:?}: {}", name, e)))?;
                index.insert(name.to_string(), segment);
                gfa.names.push(name.to_string());
            }
            "L" => {
                if fields.len() < 5 {
                    return Err(GraphError::gfa(
                        line_no,
                        "L record needs from, orientation, to, orientation",
                    ));
                }
                links.push((
                    line_no,
                    fields[1].to_string(),
                    parse_orientation(fields[2], line_no)?,
                    fields[3].to_string(),
                    parse_orientation(fields[4], line_no)?,
                ));
            }
            _ => {}
        }
    }

    let lookup = |name: &str, line_no: usize| -> Result<usize> {
        index
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::gfa(line_no, format!("unknown segment {:?}", name)))
    };
    for (line_no, from, from_rev, to, to_rev) in &links {
        let from = OrientedNode::new(lookup(from.as_str(), *line_no)?, *from_rev);
        let to = OrientedNode::new(lookup(to.as_str(), *line_no)?, *to_rev);
        gfa.graph.add_edge(from, to)?;
    }

    log::info!(
        "Parsed {} segments and {} links",
        gfa.graph.segment_count(),
        gfa.graph.edge_count()
    );
    Ok(gfa)
}

pub fn load_gfa<P: AsRef<Path>>(path: P) -> Result<GfaGraph> {
    let file = File::open(path.as_ref())?;
    parse_gfa(BufReader::new(file))
}

/// Write `graph` as GFA, naming segments from `names` (index-based names are
/// used for segments without one).
pub fn write_gfa<W: Write>(graph: &SequenceGraph, names: &[String], mut out: W) -> Result<()> {
    let name = |segment: usize| -> String {
        names
            .get(segment)
            .cloned()
            .unwrap_or_else(|| (segment + 1).to_string())
    };

    writeln!(out, "H\tVN:Z:1.0")?;
    for segment in 0..graph.segment_count() {
        writeln!(
            out,
            "S\t{}\t{}",
            name(segment),
            graph.label_string(OrientedNode::forward(segment))
        )?;
    }
    for edge in graph.edges() {
        writeln!(
            out,
            "L\t{}\t{}\t{}\t{}\t0M",
            name(edge.from.segment()),
            edge.from.orientation_char(),
            name(edge.to.segment()),
            edge.to.orientation_char()
        )?;
    }
    out.flush()?;
    Ok(())
}

pub fn save_gfa<P: AsRef<Path>>(graph: &SequenceGraph, names: &[String], path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_gfa(graph, names, BufWriter::new(file))
}
