use std::{error::Error, fs, path::PathBuf};

use clap::{Parser, Subcommand};
use graph_recognition::{
    enumerate::enumerate_chordal,
    graph::Graph,
    io as text,
    rand_helper,
    registry::{self, GraphClass, Recognition},
};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "graph-recognition", about = "Graph class recognition", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decide whether the graph in FILE (or on stdin) belongs to the class.
    Recognize {
        class: GraphClass,
        #[arg(long)]
        algorithm: Option<String>,
        #[arg(long)]
        json: bool,
        file: Option<PathBuf>,
    },
    /// Print every labelled chordal graph on n vertices to FILE (or stdout).
    EnumerateChordal { n: usize, file: Option<PathBuf> },
    /// List the classes and their algorithms, the default first.
    Classes,
    /// Run all algorithms of all classes on random graphs and compare the answers.
    CrossCheck {
        #[arg(long, default_value_t = 8)]
        nodes: usize,
        #[arg(long, default_value_t = 100)]
        samples: usize,
        #[arg(long, default_value_t = 0.5)]
        density: f64,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Serialize)]
struct Report<'a> {
    class: GraphClass,
    algorithm: &'a str,
    #[serde(flatten)]
    recognition: &'a Recognition,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    match Cli::parse().command {
        Command::Recognize { class, algorithm, json, file } => {
            let input = match file {
                Some(path) => fs::read_to_string(path)?,
                None => std::io::read_to_string(std::io::stdin())?,
            };
            let graph = text::parse_graph(&input)?;
            let algorithm = class.algorithm(algorithm.as_deref())?;
            let recognition = registry::recognize(class, &graph, Some(algorithm.name))?;
            if json {
                let report =
                    Report { class, algorithm: algorithm.name, recognition: &recognition };
                println!("{}", serde_json::to_string(&report)?);
            } else {
                print!("{}", text::format_recognition(&recognition));
            }
        },
        Command::EnumerateChordal { n, file } => {
            let output = text::format_enumeration(enumerate_chordal(n))?;
            match file {
                Some(path) => fs::write(path, output)?,
                None => print!("{output}"),
            }
        },
        Command::Classes => {
            for &class in GraphClass::ALL {
                let names: Vec<&str> = class.algorithms().iter().map(|a| a.name).collect();
                println!("{class}: {}", names.join(", "));
            }
        },
        Command::CrossCheck { nodes, samples, density, seed } => {
            if !(0.0..=1.0).contains(&density) {
                return Err(format!("the density {density} is not in [0, 1]").into());
            }
            let mut failures = 0;
            for seed in rand_helper::generate_seeds(samples, seed) {
                let rng = &mut Pcg64::seed_from_u64(seed);
                let graph = rand_helper::random_graph(nodes, density, rng);
                failures += cross_check(&graph, seed);
            }
            println!("{samples} graphs on {nodes} vertices, {failures} failures");
            if failures > 0 {
                return Err(format!("{failures} cross-check failures").into());
            }
        },
    }
    Ok(())
}

/// The number of classes whose algorithms disagree, or whose certificates are wrong.
fn cross_check(graph: &Graph, seed: u64) -> usize {
    let mut failures = 0;
    for &class in GraphClass::ALL {
        let mut answers = Vec::with_capacity(class.algorithms().len());
        for algorithm in class.algorithms() {
            let recognition = algorithm.run(graph);
            if let Err(err) = recognition.certificate.validate(graph) {
                println!("seed {seed}: {class}/{}: {err}", algorithm.name);
                failures += 1;
            }
            answers.push((algorithm.name, recognition.member));
        }
        if answers.windows(2).any(|w| w[0].1 != w[1].1) {
            println!("seed {seed}: {class} disagrees: {answers:?}");
            println!("{}", text::format_graph_line(graph));
            failures += 1;
        }
    }
    failures
}
