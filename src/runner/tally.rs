use std::cell::RefCell;
use std::rc::Rc;

use describe_core::{Event, EventKind};

use crate::bus::{EventBus, Subscription};

/// Outcome counts for one suite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteTally {
    pub name: String,
    pub passed: usize,
    pub failed: usize,
}

/// Run-wide observer counting outcomes per suite; decides the exit status.
///
/// Stays attached until dropped.
pub struct RunTally {
    suites: Rc<RefCell<Vec<SuiteTally>>>,
    _subscription: Subscription,
}

impl RunTally {
    pub fn attach(bus: &Rc<EventBus>) -> Self {
        let suites = Rc::new(RefCell::new(Vec::<SuiteTally>::new()));
        let mut subscription = Subscription::new(Rc::clone(bus));

        let seen = Rc::clone(&suites);
        subscription.on(EventKind::SuiteChanged, move |event| {
            if let Event::SuiteChanged(name) = event {
                seen.borrow_mut().push(SuiteTally {
                    name: name.clone(),
                    ..SuiteTally::default()
                });
            }
            Ok(())
        });
        let seen = Rc::clone(&suites);
        subscription.on(EventKind::Success, move |_| {
            current(&mut seen.borrow_mut()).passed += 1;
            Ok(())
        });
        let seen = Rc::clone(&suites);
        subscription.on(EventKind::Failure, move |_| {
            current(&mut seen.borrow_mut()).failed += 1;
            Ok(())
        });

        Self {
            suites,
            _subscription: subscription,
        }
    }

    pub fn suites(&self) -> Vec<SuiteTally> {
        self.suites.borrow().clone()
    }

    pub fn passed(&self) -> usize {
        self.suites.borrow().iter().map(|s| s.passed).sum()
    }

    pub fn failed(&self) -> usize {
        self.suites.borrow().iter().map(|s| s.failed).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

/// Outcomes reported before any suite announcement land in an unnamed entry.
fn current(suites: &mut Vec<SuiteTally>) -> &mut SuiteTally {
    if suites.is_empty() {
        suites.push(SuiteTally::default());
    }
    let last = suites.len() - 1;
    &mut suites[last]
}
