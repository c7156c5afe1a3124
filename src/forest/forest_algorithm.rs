use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::{
    Sample,
    Classifier,
    WeakLearner,
    DecisionTree,
    DecisionTreeBuilder,
    PruneMethod,
    C45Error,
};
use crate::common::checker;
use crate::research::Research;
use super::{EnsembleBuilder, Forest, ForestMember, IterationStats};

use std::ops::ControlFlow;


/// Default number of slots.
pub const DEFAULT_FOREST_SIZE: usize = 10;
/// Default elimination threshold.
pub const DEFAULT_THRESHOLD_DEVIATION: f64 = 0.05;
/// Default cap on the number of iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 20;


/// Draws `size` row indices out of `0..n_sample` with replacement.
pub fn bootstrap<R: Rng + ?Sized>(
    n_sample: usize,
    size: usize,
    rng: &mut R,
) -> Vec<usize>
{
    (0..size).map(|_| rng.gen_range(0..n_sample)).collect()
}


/// The bagged forest loop.
///
/// Every slot owns a fixed test bootstrap drawn in
/// [`EnsembleBuilder::preprocess`].
/// Each call of [`EnsembleBuilder::refine`]
/// draws a training bootstrap per slot,
/// fills the empty slots with score-pruned trees,
/// scores the members on their test bootstraps,
/// and empties every slot whose score is more than
/// `threshold_deviation` below the best score.
/// The loop stops once no slot is empty,
/// or after `max_iterations` iterations.
///
/// # Example
/// ```no_run
/// use miniforest::prelude::*;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let sample = Sample::from_csv("iris.csv", true)
///     .unwrap()
///     .set_target("class")
///     .unwrap();
///
/// let rng = StdRng::seed_from_u64(1234);
/// let mut builder = ForestBuilder::new(&sample, rng)
///     .forest_size(20)
///     .threshold_deviation(0.1)
///     .max_iterations(50);
///
/// let (forest, stats) = builder.run().unwrap();
/// let accuracy = forest.accuracy(&sample, &sample.indices()).unwrap();
/// println!("{} iterations, accuracy {accuracy}", stats.len());
/// ```
pub struct ForestBuilder<'a, R> {
    sample: &'a Sample,
    rng: R,

    forest_size: usize,
    threshold_deviation: f64,
    bag_size: Option<usize>,
    max_iterations: usize,
    weak_learner: DecisionTree,

    // Fixed test bootstraps, one per slot.
    tests: Vec<Vec<usize>>,
    forest: Forest,
    stats: Vec<IterationStats>,
}


impl<'a, R: Rng> ForestBuilder<'a, R> {
    /// Construct a new instance of `ForestBuilder`
    /// with the default parameters.
    /// `rng` is the only random source of the loop.
    pub fn new(sample: &'a Sample, rng: R) -> Self {
        Self {
            sample,
            rng,

            forest_size: DEFAULT_FOREST_SIZE,
            threshold_deviation: DEFAULT_THRESHOLD_DEVIATION,
            bag_size: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            weak_learner: DecisionTree::default(),

            tests: Vec::new(),
            forest: Forest::default(),
            stats: Vec::new(),
        }
    }


    /// Set the number of slots.
    pub fn forest_size(mut self, forest_size: usize) -> Self {
        self.forest_size = forest_size;
        self
    }


    /// Set the largest accepted gap to the best member score.
    pub fn threshold_deviation(mut self, threshold_deviation: f64) -> Self {
        self.threshold_deviation = threshold_deviation;
        self
    }


    /// Set the size of every bootstrap.
    /// Defaults to a quarter of the sample, rounded up.
    pub fn bag_size(mut self, bag_size: usize) -> Self {
        self.bag_size = Some(bag_size);
        self
    }


    /// Set the maximum number of iterations.
    /// The loop runs at most `max_iterations` refinements,
    /// so `max_iterations(1)` builds every slot once and eliminates once.
    /// When the cap is hit with empty slots,
    /// the partially filled forest is returned.
    /// Default is [`DEFAULT_MAX_ITERATIONS`].
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }


    /// Set the tree learner that fills the empty slots.
    pub fn weak_learner(mut self, weak_learner: DecisionTree) -> Self {
        self.weak_learner = weak_learner;
        self
    }


    /// Returns the statistics recorded so far.
    pub fn stats(&self) -> &[IterationStats] {
        &self.stats[..]
    }


    /// Returns the tree learner.
    pub fn tree_learner(&self) -> &DecisionTree {
        &self.weak_learner
    }


    /// Returns the forest in its current state.
    pub fn forest(&self) -> &Forest {
        &self.forest
    }


    fn resolved_bag_size(&self) -> usize {
        let n_sample = self.sample.shape().0;
        self.bag_size.unwrap_or_else(|| n_sample.div_ceil(4))
    }


    /// Builds and score-prunes a tree for every empty slot.
    /// Filled slots keep their member.
    fn fill_empty_slots(&mut self, trains: Vec<Vec<usize>>)
        -> Result<(), C45Error>
    {
        let sample = self.sample;
        let learner = &self.weak_learner;
        let fills = self.forest.slots()
            .par_iter()
            .zip(trains.into_par_iter())
            .zip(self.tests.par_iter())
            .enumerate()
            .map(|(slot, ((member, train), test))| {
                if member.is_some() {
                    return Ok(None);
                }
                let mut tree = learner.produce(sample, &train)?;
                tree.prune(sample, test, PruneMethod::Score)?;
                debug!(slot, n_nodes = tree.n_nodes(), "filled slot");
                Ok(Some(ForestMember { tree, train, test: test.clone() }))
            })
            .collect::<Result<Vec<_>, C45Error>>()?;

        let slots = self.forest.slots_mut();
        for (slot, fill) in slots.iter_mut().zip(fills) {
            if fill.is_some() {
                *slot = fill;
            }
        }
        Ok(())
    }


    /// Empties the slots scoring more than `threshold_deviation`
    /// below `max_score`.
    /// Returns the number of emptied slots.
    fn eliminate(&mut self, scores: &[Option<f64>], max_score: f64)
        -> usize
    {
        let threshold = self.threshold_deviation;
        let slots = self.forest.slots_mut();
        let mut eliminated = 0;
        for (slot, (member, score)) in slots.iter_mut().zip(scores).enumerate() {
            let Some(score) = score else { continue; };
            if (score - max_score).abs() > threshold {
                debug!(slot, score, "eliminated slot");
                *member = None;
                eliminated += 1;
            }
        }
        eliminated
    }
}


impl<R: Rng> EnsembleBuilder for ForestBuilder<'_, R> {
    type Output = (Forest, Vec<IterationStats>);


    fn name(&self) -> &str {
        "Bagged C4.5 Forest"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let (n_sample, n_feature) = self.sample.shape();
        let mut info = Vec::from([
            ("# of examples", format!("{n_sample}")),
            ("# of features", format!("{n_feature}")),
            ("Forest size", format!("{}", self.forest_size)),
            ("Deviation", format!("{}", self.threshold_deviation)),
            ("Bag size", format!("{}", self.resolved_bag_size())),
            ("Max iterations", format!("{}", self.max_iterations)),
        ]);
        if let Some(tree_info) = self.weak_learner.info() {
            info.extend(tree_info);
        }
        Some(info)
    }


    fn preprocess(&mut self) -> Result<(), C45Error> {
        checker::check_sample(self.sample)?;
        checker::check_positive("forest_size", self.forest_size)?;
        checker::check_positive("max_iterations", self.max_iterations)?;
        checker::check_non_negative(
            "threshold_deviation", self.threshold_deviation
        )?;
        let bag_size = self.resolved_bag_size();
        checker::check_positive("bag_size", bag_size)?;

        let n_sample = self.sample.shape().0;
        let rng = &mut self.rng;
        self.tests = (0..self.forest_size)
            .map(|_| bootstrap(n_sample, bag_size, &mut *rng))
            .collect();
        self.forest = Forest::with_capacity(self.forest_size);
        self.stats = Vec::new();

        info!(
            forest_size = self.forest_size,
            bag_size,
            threshold_deviation = self.threshold_deviation,
            "drew test bootstraps"
        );
        Ok(())
    }


    #[instrument(skip_all, fields(iteration))]
    fn refine(&mut self, iteration: usize)
        -> Result<ControlFlow<usize>, C45Error>
    {
        if self.forest.capacity() == 0 || self.tests.len() != self.forest_size {
            return Err(C45Error::InvalidConfig {
                parameter: "forest_size",
                reason: "`preprocess` must run before `refine`".to_string(),
            });
        }

        let n_sample = self.sample.shape().0;
        let bag_size = self.resolved_bag_size();
        let rng = &mut self.rng;
        let trains = (0..self.forest_size)
            .map(|_| bootstrap(n_sample, bag_size, &mut *rng))
            .collect::<Vec<_>>();

        self.fill_empty_slots(trains)?;


        let sample = self.sample;
        let scores = self.forest.slots()
            .iter()
            .map(|slot| {
                slot.as_ref()
                    .map(|member| member.tree.accuracy(sample, &member.test))
                    .transpose()
            })
            .collect::<Result<Vec<_>, C45Error>>()?;
        let filled = scores.iter()
            .flatten()
            .copied()
            .collect::<Vec<f64>>();
        let max_score = filled.iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        let eliminated = self.eliminate(&scores, max_score);

        let ensemble_score = self.forest.accuracy(sample, &sample.indices())?;
        let stats = IterationStats::summarize(
            iteration, &filled, ensemble_score, eliminated
        ).ok_or(C45Error::EmptyEnsemble)?;

        info!(
            mean = stats.mean_score,
            max = stats.max_score,
            min = stats.min_score,
            ensemble = stats.ensemble_score,
            eliminated,
            "forest iteration"
        );
        self.stats.push(stats);


        if self.forest.is_full() {
            return Ok(ControlFlow::Break(iteration));
        }
        if iteration >= self.max_iterations {
            info!(
                n_filled = self.forest.n_filled(),
                "reached the iteration cap with empty slots"
            );
            return Ok(ControlFlow::Break(iteration));
        }
        Ok(ControlFlow::Continue(()))
    }


    fn postprocess(&mut self) -> Self::Output {
        let forest = std::mem::take(&mut self.forest);
        let stats = std::mem::take(&mut self.stats);
        (forest, stats)
    }
}


impl<R: Rng> Research for ForestBuilder<'_, R> {
    fn last_stats(&self) -> Option<&IterationStats> {
        self.stats.last()
    }
}


/// Runs the forest loop with the default tree learner.
/// `bag_size = None` uses a quarter of the sample, rounded up.
#[instrument(skip_all, fields(forest_size, threshold_deviation))]
pub fn build_forest<R: Rng>(
    sample: &Sample,
    forest_size: usize,
    threshold_deviation: f64,
    bag_size: Option<usize>,
    max_iterations: usize,
    rng: R,
) -> Result<(Forest, Vec<IterationStats>), C45Error>
{
    let weak_learner = DecisionTreeBuilder::new().build()?;
    let mut builder = ForestBuilder::new(sample, rng)
        .forest_size(forest_size)
        .threshold_deviation(threshold_deviation)
        .max_iterations(max_iterations)
        .weak_learner(weak_learner);
    if let Some(bag_size) = bag_size {
        builder = builder.bag_size(bag_size);
    }
    builder.run()
}
