use colored::Colorize;

use crate::{C45Error, EnsembleBuilder, IterationStats};

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::time::Instant;
use std::ops::ControlFlow;

const DEFAULT_ROUND: usize = 1;
const DEFAULT_TIMELIMIT_MILLIS: u128 = u128::MAX;
const WIDTH: usize = 8;
const PREC_WIDTH: usize = 5;
const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;
const HEADER: &str
    = "Iteration,MeanScore,MaxScore,MinScore,EnsembleScore,Eliminated,Time\n";


/// Implementing this trait allows you to use [`Logger`] to
/// log algorithm's behavior.
pub trait Research {
    /// Returns the statistics of the latest iteration.
    fn last_stats(&self) -> Option<&IterationStats>;
}


/// Struct `Logger` runs an [`EnsembleBuilder`]
/// and logs the member scores, the ensemble accuracy,
/// and the running time of each iteration.
///
/// # Example
/// ```no_run
/// use miniforest::prelude::*;
/// use miniforest::research::Logger;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let sample = Sample::from_csv("iris.csv", true)
///     .unwrap()
///     .set_target("class")
///     .unwrap();
///
/// let builder = ForestBuilder::new(&sample, StdRng::seed_from_u64(0))
///     .forest_size(10);
/// let mut logger = Logger::new(builder)
///     .time_limit_as_secs(60);
/// let (forest, stats) = logger.run("forest.csv").unwrap();
/// ```
pub struct Logger<B> {
    builder: B,
    time_limit: u128,
    round: usize,
}


impl<B> Logger<B> {
    /// Create a new instance of `Logger`.
    pub fn new(builder: B) -> Self {
        Self {
            builder,
            time_limit: DEFAULT_TIMELIMIT_MILLIS,
            round: DEFAULT_ROUND,
        }
    }


    /// Set the time limit as milliseconds.
    /// If the algorithm reaches this limit,
    /// breaks after the current iteration.
    #[inline(always)]
    pub fn time_limit_as_millis(mut self, time_limit: u128) -> Self {
        self.time_limit = time_limit;
        self
    }


    /// Set the time limit as seconds.
    #[inline(always)]
    pub fn time_limit_as_secs(mut self, time_limit: u64) -> Self {
        self.time_limit = time_limit as u128 * 1_000;
        self
    }


    /// Set the time limit as minutes.
    #[inline(always)]
    pub fn time_limit_as_mins(mut self, time_limit: u64) -> Self {
        self.time_limit = time_limit as u128 * 60_000;
        self
    }


    /// Set the interval to print the current status.
    /// By default, the method `run` prints its status every iteration.
    /// If you don't want to print the log,
    /// set `usize::MAX`.
    #[inline(always)]
    pub fn print_every(mut self, round: usize) -> Self {
        self.round = round.max(1);
        self
    }


    /// Returns the wrapped builder.
    pub fn builder(&self) -> &B {
        &self.builder
    }
}


impl<B> Logger<B>
    where B: EnsembleBuilder + Research,
{
    #[inline(always)]
    fn print_log_header(&self) {
        println!(
            "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}",
            "".bold().red(),
            "MEAN".bold().blue(),
            "MAX".bold().green(),
            "MIN".bold().yellow(),
            "FOREST".bold().magenta(),
            "ELIM.".bold().white(),
            "ACC.".bold().cyan(),
        );
        println!(
            "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\n",
            "ITER".bold().red(),
            "SCORE".bold().blue(),
            "SCORE".bold().green(),
            "SCORE".bold().yellow(),
            "SCORE".bold().magenta(),
            "SLOTS".bold().white(),
            "TIME".bold().cyan(),
        );
    }


    /// print current settings.
    #[inline(always)]
    fn print_stats(&self) {
        let limit = if self.time_limit != u128::MAX {
            time_format(self.time_limit)
        } else {
            "Nothing".into()
        };
        let header = format!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "STATS".bold(), "",
        );
        println!(
            "\n{header}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Algorithm".bold(),
            self.builder.name().bold().green(),
        );

        if let Some(info) = self.builder.info() {
            let line = info.into_iter()
                .map(|(key, val)| {
                    format!(
                        "    + {:<STAT_WIDTH$}\t{:>width$}",
                        key,
                        val.bold().yellow(),
                        width = STAT_WIDTH - 8
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            println!("{line}");
        }

        println!(
            "\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            {:=^FULL_WIDTH$}\n\
            ",
            "Time Limit".bold(),
            limit.bold().green(),
            "".bold(),
        );
    }


    fn print_row(&self, tag: &str, stats: &IterationStats, time_acc: u128) {
        println!(
            "{tag} {}\t\t{}\t{}\t{}\t{}\t{}\t{}",
            format!("{:>WIDTH$}", stats.iteration).red(),
            format!("{:>WIDTH$.PREC_WIDTH$}", stats.mean_score).blue(),
            format!("{:>WIDTH$.PREC_WIDTH$}", stats.max_score).green(),
            format!("{:>WIDTH$.PREC_WIDTH$}", stats.min_score).yellow(),
            format!("{:>WIDTH$.PREC_WIDTH$}", stats.ensemble_score).magenta(),
            format!("{:>WIDTH$}", stats.eliminated).white(),
            time_format(time_acc).bold().cyan(),
        );
    }


    /// Run the given algorithm with logging.
    /// Note that this method is almost the same as
    /// [`EnsembleBuilder::run`].
    /// This method measures running time per iteration,
    /// and writes one CSV line per iteration to `filename`.
    pub fn run<P: AsRef<Path>>(&mut self, filename: P)
        -> Result<B::Output, C45Error>
    {
        let path = filename.as_ref();
        let write_error = |source: std::io::Error| C45Error::WriteFile {
            path: path.to_path_buf(),
            source,
        };

        // Open file
        let mut file = File::create(path).map_err(write_error)?;

        // Write header to the file
        file.write_all(HEADER.as_bytes()).map_err(write_error)?;

        // ---------------------------------------------------------------------
        // Pre-processing
        self.builder.preprocess()?;
        let verbose = self.round != usize::MAX;
        if verbose { self.print_stats(); }

        // Cumulative time
        let mut time_acc = 0;

        // ---------------------------------------------------------------------
        // Main loop
        if verbose { self.print_log_header(); }
        let mut iteration = 1;
        loop {
            // Start measuring time
            let now = Instant::now();

            let flow = self.builder.refine(iteration)?;

            // Stop measuring and convert `Duration` to Milliseconds.
            time_acc += now.elapsed().as_millis();

            let Some(&stats) = self.builder.last_stats() else {
                if flow.is_break() { break; }
                iteration += 1;
                continue;
            };

            // Write the results to `file`.
            let line = format!("{},{time_acc}\n", stats.to_csv());
            file.write_all(line.as_bytes()).map_err(write_error)?;

            if time_acc > self.time_limit {
                if verbose {
                    let tag = "[TLE]".bold().bright_red().to_string();
                    self.print_row(&tag, &stats, time_acc);
                    println!();
                }
                break;
            }

            if verbose && iteration % self.round == 0 {
                let tag = "[LOG]".bold().magenta().to_string();
                self.print_row(&tag, &stats, time_acc);
            }

            if let ControlFlow::Break(_) = flow {
                if verbose {
                    let tag = "[FIN]".bold().bright_green().to_string();
                    self.print_row(&tag, &stats, time_acc);
                    println!();
                }
                break;
            }
            iteration += 1;
        }

        Ok(self.builder.postprocess())
    }
}


fn time_format(millisec: u128) -> String {
    if millisec < 1_000 {
        return format!("  0.{:0>3}s", millisec);
    }
    let sec = millisec / 1_000;
    let millisec = millisec % 1_000;
    if sec < 60 {
        return format!(" {:0>2}.{:0>3}s", sec, millisec);
    }
    let min = sec / 60;
    let sec = sec % 60;
    if min < 60 {
        return format!(" {:0>2}m {:0>2}s", min, sec);
    }
    let hours = min / 60;
    let min = min % 60;
    format!(" {:0>2}h {:0>2}m", hours, min)
}
