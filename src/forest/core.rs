//! Provides `EnsembleBuilder` trait.

use crate::C45Error;

use std::ops::ControlFlow;


/// The trait [`EnsembleBuilder`] defines the standard framework
/// of an iterative ensemble construction.
///
/// You need to implement [`EnsembleBuilder::preprocess`],
/// [`EnsembleBuilder::refine`],
/// and [`EnsembleBuilder::postprocess`]
/// to write a new ensemble algorithm.
pub trait EnsembleBuilder {
    /// The value returned by [`EnsembleBuilder::postprocess`].
    type Output;


    /// Returns the name of the algorithm.
    fn name(&self) -> &str;


    /// Returns the parameters of the algorithm as `(name, value)` pairs.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// A main function that runs the algorithm.
    fn run(&mut self) -> Result<Self::Output, C45Error> {
        self.preprocess()?;

        let mut iteration = 1;
        while self.refine(iteration)?.is_continue() {
            iteration += 1;
        }

        Ok(self.postprocess())
    }


    /// Pre-processing for `self`.
    /// As you can see in [`EnsembleBuilder::run`],
    /// this method is called before the first iteration.
    /// Invalid parameters are reported here.
    fn preprocess(&mut self) -> Result<(), C45Error>;


    /// One iteration of the algorithm.
    /// This method returns
    /// `ControlFlow::Continue(())` if another iteration is needed,
    /// `ControlFlow::Break(terminated_iter)` otherwise.
    fn refine(&mut self, iteration: usize)
        -> Result<ControlFlow<usize>, C45Error>;


    /// Post-processing.
    /// This method hands over the result.
    fn postprocess(&mut self) -> Self::Output;
}
