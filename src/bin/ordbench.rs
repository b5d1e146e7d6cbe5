use std::{env, process};

use ordbench::{
    DatasetSize, HarnessError, Pipeline, history,
    report::render_table,
};

const DEFAULT_SEED: u64 = 0xB1E55;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        print_help();
        return;
    }
    let size = match parse_size(&args) {
        Ok(size) => size,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };
    if let Err(err) = run(size) {
        eprintln!("ordbench failed: {err}");
        process::exit(1);
    }
}

fn print_help() {
    println!("ordbench - comparative benchmark for ordered key-value stores");
    println!();
    println!("usage: ordbench [--size N]");
    println!("  --size N   dataset record count, one of 1, 100, 500, 2000 (default 500)");
}

fn parse_size(args: &[String]) -> Result<DatasetSize, HarnessError> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--size" => {
                let value = iter
                    .next()
                    .ok_or_else(|| HarnessError::invalid_input("--size requires a value"))?;
                let count: usize = value
                    .parse()
                    .map_err(|_| HarnessError::invalid_input(format!("bad size {value}")))?;
                return DatasetSize::from_count(count);
            }
            other => {
                return Err(HarnessError::invalid_input(format!(
                    "unknown argument {other}"
                )));
            }
        }
    }
    Ok(DatasetSize::Medium)
}

fn run(size: DatasetSize) -> Result<(), HarnessError> {
    println!("creating dataset of {} records", size.record_count());
    let pipeline = Pipeline::new(size, DEFAULT_SEED);

    let report = pipeline.run()?;
    let record_history = env::var_os("ORDBENCH_HISTORY_FILE").is_some();

    for suite in &report.suites {
        println!("testing {}", suite.kind.label());
        print!("{}", render_table(&suite.table));
        if record_history {
            history::record_suite(suite.kind, &suite.results)?;
        }
    }

    println!("final results:");
    print!("{}", render_table(&report.final_table));
    Ok(())
}
