use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::GraphError;
use crate::gfa::{load_gfa, save_gfa};
use crate::kmer_rank::KmerCount;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "seqwalk",
    version,
    about = "Pattern search and k-mer ranking over walks of a bidirected sequence graph"
)]
pub struct Args {
    /// Input GFA file
    #[arg(short, long)]
    pub input: String,

    /// Pattern to search for along source-to-destination walks (repeatable)
    #[arg(short, long = "pattern", default_value = "TTCA")]
    pub patterns: Vec<String>,

    /// k-mer length for the frequency ranking
    #[arg(short = 'k', long, default_value = "3")]
    pub kmer_length: usize,

    /// Number of most frequent k-mers to report
    #[arg(short = 'n', long, default_value = "10")]
    pub top: usize,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write the acyclic graph to this GFA file
    #[arg(long = "write-acyclic")]
    pub write_acyclic: Option<String>,

    /// Number of threads used to answer several patterns at once
    #[arg(short, long, default_value = "1")]
    pub threads: usize,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Arguments with the command-line defaults for `input`.
    pub fn with_input(input: impl Into<String>) -> Self {
        Args {
            input: input.into(),
            patterns: vec!["TTCA".to_string()],
            kmer_length: 3,
            top: 10,
            output: None,
            json: false,
            write_acyclic: None,
            threads: 1,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternResult {
    pub pattern: String,
    pub found: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub input: String,
    pub segments: usize,
    pub edges: usize,
    pub was_cyclic: bool,
    pub dropped_edges: usize,
    pub source: String,
    pub destination: String,
    pub patterns: Vec<PatternResult>,
    pub k: usize,
    pub top: usize,
    pub kmers: Vec<KmerCount>,
}

impl Report {
    pub fn write_text<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(
            out,
            "Graph \"{}\": {} segments, {} edges",
            self.input, self.segments, self.edges
        )?;
        if self.was_cyclic {
            writeln!(
                out,
                "The graph was cyclic, and has now been rendered acyclic! ({} back edge(s) removed)",
                self.dropped_edges
            )?;
        } else {
            writeln!(out, "The graph was already acyclic!")?;
        }
        writeln!(out, "Source: {}", self.source)?;
        writeln!(out, "Destination: {}", self.destination)?;
        writeln!(out)?;

        for result in &self.patterns {
            if result.found {
                writeln!(out, "Pattern \"{}\" was found!", result.pattern)?;
            } else {
                writeln!(out, "Pattern \"{}\" was NOT found!", result.pattern)?;
            }
        }
        writeln!(out)?;

        writeln!(
            out,
            "Top {} most frequent K-mers with K={}:",
            self.top, self.k
        )?;
        if self.kmers.is_empty() {
            writeln!(out, "No k-mers were found!")?;
        }
        for (i, kc) in self.kmers.iter().enumerate() {
            writeln!(out, "{}. {} - {}", i + 1, kc.kmer, kc.count)?;
        }
        out.flush()
    }

    pub fn write_json<W: Write>(&self, mut out: W) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut out, self)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}

/// Load the graph, make it acyclic, resolve the endpoints, then run the pattern
/// searches and the k-mer ranking. The report is written to `args.output` (or
/// stdout) and returned.
pub fn run_seqwalk(args: &Args) -> anyhow::Result<Report> {
    log::info!("Reading input file {}", args.input);
    let gfa = load_gfa(&args.input).with_context(|| format!("failed to load {}", args.input))?;

    log::info!("Checking whether the graph is acyclic");
    let (graph, was_cyclic) = gfa.graph.linearize();
    let dropped_edges = gfa.graph.edge_count() - graph.edge_count();
    if was_cyclic {
        log::warn!(
            "Graph was cyclic: removed {} back edge(s) to render it acyclic",
            dropped_edges
        );
    }

    if let Some(path) = &args.write_acyclic {
        save_gfa(&graph, &gfa.names, path)
            .with_context(|| format!("failed to write acyclic graph to {}", path))?;
        log::info!("Wrote acyclic graph to {}", path);
    }

    let source = graph.source().ok_or(GraphError::NoSource)?;
    let destination = graph
        .destination(source)
        .ok_or(GraphError::NoDestination(source))?;
    log::info!(
        "Source {} and destination {}",
        gfa.describe(source),
        gfa.describe(destination)
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads.max(1))
        .build()
        .context("failed to build thread pool")?;
    let patterns: Vec<PatternResult> = pool.install(|| {
        args.patterns
            .par_iter()
            .map(|pattern| PatternResult {
                pattern: pattern.clone(),
                found: graph.contains_pattern(pattern, source, destination),
            })
            .collect()
    });

    log::info!("Ranking the top {} {}-mers", args.top, args.kmer_length);
    let kmers = graph.top_kmers(args.kmer_length, args.top, source, destination)?;

    let report = Report {
        input: args.input.clone(),
        segments: graph.segment_count(),
        edges: graph.edge_count(),
        was_cyclic,
        dropped_edges,
        source: gfa.describe(source),
        destination: gfa.describe(destination),
        patterns,
        k: args.kmer_length,
        top: args.top,
        kmers,
    };

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    if args.json {
        report.write_json(out)?;
    } else {
        report.write_text(out)?;
    }
    Ok(report)
}
