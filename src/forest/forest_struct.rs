use serde::{Serialize, Deserialize};

use crate::{Classifier, DecisionTreeClassifier, Record, C45Error};


/// A tree of a forest together with the bootstrap subsets
/// it was grown on (`train`) and scored on (`test`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestMember {
    /// The pruned tree.
    pub tree: DecisionTreeClassifier,
    /// Row indices of the training bootstrap.
    pub train: Vec<usize>,
    /// Row indices of the test bootstrap.
    pub test: Vec<usize>,
}


/// A fixed number of ordered slots, each empty or holding a member.
/// A forest classifies by majority vote of its members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Forest {
    slots: Vec<Option<ForestMember>>,
}


impl Forest {
    /// Construct a forest of `size` empty slots.
    pub(crate) fn with_capacity(size: usize) -> Self {
        let slots = (0..size).map(|_| None).collect();
        Self { slots }
    }


    /// Returns the slots.
    pub fn slots(&self) -> &[Option<ForestMember>] {
        &self.slots[..]
    }


    pub(crate) fn slots_mut(&mut self) -> &mut [Option<ForestMember>] {
        &mut self.slots[..]
    }


    /// Returns the members in slot order.
    pub fn members(&self) -> impl Iterator<Item = &ForestMember> + '_ {
        self.slots.iter().flatten()
    }


    /// Returns the trees in slot order.
    pub fn trees(&self) -> impl Iterator<Item = &DecisionTreeClassifier> + '_ {
        self.members().map(|member| &member.tree)
    }


    /// Returns the number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }


    /// Returns the number of filled slots.
    pub fn n_filled(&self) -> usize {
        self.members().count()
    }


    /// Returns `true` if no slot is empty.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }


    /// Returns `true` if every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}


impl Classifier for Forest {
    /// Majority vote over the members.
    /// Members that cannot classify `point` abstain.
    /// Ties go to the label voted first in slot order.
    fn classify<R>(&self, point: &R) -> Result<&str, C45Error>
        where R: Record + ?Sized
    {
        // `(label, votes)` in order of first vote.
        let mut votes: Vec<(&str, usize)> = Vec::new();
        for tree in self.trees() {
            let Ok(label) = tree.classify(point) else { continue; };
            match votes.iter_mut().find(|(l, _)| *l == label) {
                Some((_, count)) => *count += 1,
                None => votes.push((label, 1)),
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for (label, count) in votes {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((label, count));
            }
        }
        best.map(|(label, _)| label)
            .ok_or(C45Error::EmptyEnsemble)
    }
}
