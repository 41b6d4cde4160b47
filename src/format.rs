//! Text interchange format shared by `graphgen` and `bfs`.
//!
//! ```text
//! <N>
//! <starting_0> <degree_0>
//! ...
//!
//! <source>
//!
//! <M>
//! <dest_0> <weight_0>
//! ...
//! ```
//!
//! Fields are whitespace separated, so blank lines carry no meaning when
//! reading. `M` must equal the end of the last node's span.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::info;

use crate::error::{BfsError, MalformedInputError};
use crate::graph::{CsrGraph, Edge, NodeSpan};

/// A graph together with the source node it should be traversed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BfsInstance {
    pub graph: CsrGraph,
    pub source: u32,
}

/// Output file name used by `graphgen`: `graph<suffix>.txt`.
pub fn graph_file_name(suffix: &str) -> PathBuf {
    PathBuf::from(format!("graph{suffix}.txt"))
}

/// Output file name used by `bfs`: `result_<N>.txt`.
pub fn result_file_name(nodes: usize) -> PathBuf {
    PathBuf::from(format!("result_{nodes}.txt"))
}

struct Tokens<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    current: Option<(usize, std::str::SplitWhitespace<'a>)>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self { lines: text.lines().enumerate(), current: None }
    }

    fn next_token(&mut self) -> Option<(usize, &'a str)> {
        loop {
            if let Some((line, words)) = self.current.as_mut() {
                if let Some(w) = words.next() {
                    return Some((*line, w));
                }
            }
            let (idx, text) = self.lines.next()?;
            self.current = Some((idx + 1, text.split_whitespace()));
        }
    }

    fn number<T: FromStr>(&mut self, expected: &'static str) -> Result<T, MalformedInputError> {
        let (line, token) = self.next_token().ok_or(MalformedInputError::UnexpectedEof { expected })?;
        token.parse().map_err(|_| MalformedInputError::InvalidNumber { line, expected, token: token.to_string() })
    }
}

pub fn parse_instance(text: &str) -> Result<BfsInstance, MalformedInputError> {
    let mut tokens = Tokens::new(text);
    let n: u32 = tokens.number("node count")?;
    // Counts come from the file; never reserve more than the text can hold.
    let budget = text.len() / 4;
    let mut nodes = Vec::with_capacity((n as usize).min(budget));
    for _ in 0..n {
        let starting = tokens.number("node edge offset")?;
        let degree = tokens.number("node degree")?;
        nodes.push(NodeSpan { starting, degree });
    }
    let source: u32 = tokens.number("source node id")?;
    let m: u64 = tokens.number("edge count")?;
    let expected = nodes.last().map(NodeSpan::end).unwrap_or(0);
    if m != expected {
        return Err(MalformedInputError::EdgeCountMismatch { declared: m, expected });
    }
    let mut edges = Vec::with_capacity((m as usize).min(budget));
    for _ in 0..m {
        let dest = tokens.number("edge destination")?;
        let weight = tokens.number("edge weight")?;
        edges.push(Edge { dest, weight });
    }
    if let Some((line, token)) = tokens.next_token() {
        return Err(MalformedInputError::TrailingData { line, token: token.to_string() });
    }
    let graph = CsrGraph::new(nodes, edges)?;
    Ok(BfsInstance { graph, source })
}

pub fn read_instance(path: &Path) -> Result<BfsInstance, MalformedInputError> {
    let text = std::fs::read_to_string(path).map_err(|source| MalformedInputError::Open { path: path.to_path_buf(), source })?;
    let instance = parse_instance(&text)?;
    info!(path = %path.display(), nodes = instance.graph.node_count(), edges = instance.graph.edge_count(), "graph loaded");
    Ok(instance)
}

pub fn write_instance<W: Write>(out: &mut W, instance: &BfsInstance) -> std::io::Result<()> {
    let graph = &instance.graph;
    writeln!(out, "{}", graph.node_count())?;
    for span in graph.nodes() {
        writeln!(out, "{} {}", span.starting, span.degree)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", instance.source)?;
    writeln!(out)?;
    writeln!(out, "{}", graph.edge_count())?;
    for edge in graph.edges() {
        writeln!(out, "{} {}", edge.dest, edge.weight)?;
    }
    Ok(())
}

pub fn save_instance(path: &Path, instance: &BfsInstance) -> Result<(), BfsError> {
    write_file(path, |out| write_instance(out, instance))
}

/// One line per node: `<id>) cost:<cost>`.
pub fn write_costs<W: Write>(out: &mut W, costs: &[i32]) -> std::io::Result<()> {
    for (i, c) in costs.iter().enumerate() {
        writeln!(out, "{i}) cost:{c}")?;
    }
    Ok(())
}

pub fn save_costs(path: &Path, costs: &[i32]) -> Result<(), BfsError> {
    write_file(path, |out| write_costs(out, costs))
}

fn write_file<F>(path: &Path, body: F) -> Result<(), BfsError>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let wrap = |source: std::io::Error| BfsError::Write { path: path.to_path_buf(), source };
    let mut out = BufWriter::new(File::create(path).map_err(wrap)?);
    body(&mut out).map_err(wrap)?;
    out.flush().map_err(wrap)
}
