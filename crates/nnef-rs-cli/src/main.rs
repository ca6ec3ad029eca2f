use std::env;
use std::fs;
use std::process;

use nnef_rs::{load_graph, LoadOptions};
use nnef_rs_backend_ada::generate_ada_program;

fn main() {
    process::exit(run(env::args().skip(1).collect()));
}

fn run(args: Vec<String>) -> i32 {
    let Some((path, rest)) = args.split_first() else {
        eprintln!("Input file name must be provided");
        return -1;
    };

    let options = parse_options(rest);

    let graph = match load_graph(path, &options) {
        Ok(graph) => graph,
        Err(err) if err.is_load_failure() => {
            eprintln!("{err}");
            return -2;
        }
        Err(err) => {
            eprintln!("{err}");
            return -3;
        }
    };

    match generate_ada_program(&graph) {
        Ok(program) => {
            print!("{}", program.to_labeled_text());
            0
        }
        Err(err) => {
            eprintln!("{err}");
            -4
        }
    }
}

/// Options after the graph path. Bad or unknown options are reported and
/// skipped; only a missing graph file aborts the run.
fn parse_options(args: &[String]) -> LoadOptions {
    let mut stdlib: Option<String> = None;
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--stdlib" => {
                index += 1;
                match args.get(index) {
                    Some(file) if !file.starts_with('-') => match fs::read_to_string(file) {
                        Ok(contents) => {
                            let blob = stdlib.get_or_insert_with(String::new);
                            blob.push_str(&contents);
                        }
                        Err(err) => eprintln!("cannot read stdlib file {file}: {err}"),
                    },
                    _ => {
                        eprintln!("Stdlib file name must be provided after --stdlib; ignoring option");
                        continue;
                    }
                }
            }
            option => eprintln!("Unrecognized option: {option}; ignoring"),
        }
        index += 1;
    }
    LoadOptions { stdlib }
}
