//! Staff polls.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use staffhub_auth::ScopedRecord;
use staffhub_core::{DomainError, DomainResult, PollId, Record, UserId};

/// A poll with a fixed option list. One vote per user; voting again
/// replaces the previous choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: PollId,
    pub question: String,
    pub options: Vec<String>,
    pub votes: HashMap<UserId, usize>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Poll {
    pub fn new(question: impl Into<String>, options: Vec<String>) -> DomainResult<Self> {
        if options.len() < 2 {
            return Err(DomainError::validation("a poll needs at least two options"));
        }
        Ok(Self {
            id: PollId::new(),
            question: question.into(),
            options,
            votes: HashMap::new(),
            active: true,
            created_at: Utc::now(),
        })
    }

    pub fn vote(&mut self, voter: UserId, option: usize) -> DomainResult<()> {
        if !self.active {
            return Err(DomainError::validation("the poll is closed"));
        }
        if option >= self.options.len() {
            return Err(DomainError::validation(format!(
                "option {option} does not exist"
            )));
        }
        self.votes.insert(voter, option);
        Ok(())
    }

    /// Vote counts, indexed like `options`.
    pub fn tally(&self) -> Vec<usize> {
        let mut counts = vec![0; self.options.len()];
        for &choice in self.votes.values() {
            counts[choice] += 1;
        }
        counts
    }

    pub fn close(&mut self) {
        self.active = false;
    }
}

impl Record for Poll {
    type Id = PollId;

    fn id(&self) -> &PollId {
        &self.id
    }
}

impl ScopedRecord for Poll {}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll() -> Poll {
        Poll::new("Lunch?", vec!["pizza".into(), "sushi".into()]).unwrap()
    }

    #[test]
    fn needs_at_least_two_options() {
        assert!(Poll::new("?", vec!["only".into()]).is_err());
    }

    #[test]
    fn revoting_replaces_the_previous_choice() {
        let mut p = poll();
        let voter = UserId::new();
        p.vote(voter, 0).unwrap();
        p.vote(voter, 1).unwrap();
        assert_eq!(p.tally(), vec![0, 1]);
    }

    #[test]
    fn closed_polls_and_bad_options_reject_votes() {
        let mut p = poll();
        assert!(p.vote(UserId::new(), 2).is_err());
        p.close();
        assert!(p.vote(UserId::new(), 0).is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: however the votes arrive (including revotes), the
            /// tally sums to the number of distinct voters.
            #[test]
            fn tally_sums_to_the_distinct_voter_count(
                votes in proptest::collection::vec((0usize..5, 0usize..3), 0..60),
            ) {
                let mut p = Poll::new(
                    "?",
                    vec!["a".into(), "b".into(), "c".into()],
                ).unwrap();
                let pool: Vec<UserId> = (0..5).map(|_| UserId::new()).collect();
                for &(who, choice) in &votes {
                    p.vote(pool[who], choice).unwrap();
                }

                let distinct: std::collections::HashSet<usize> =
                    votes.iter().map(|&(who, _)| who).collect();
                prop_assert_eq!(p.tally().iter().sum::<usize>(), distinct.len());
            }
        }
    }
}
