//! Sub-program registry and dispatch.

use tracing::debug;

use argtree_core::DispatchError;

use crate::tree::{NodeId, ParseTree};

/// One registration: a callback bound to a group.
///
/// The callback reads decoded values from the shared tree through the typed
/// handles it captured at registration time, and returns a process-style
/// exit code.
pub(crate) struct SubProgram {
    group: NodeId,
    run: Box<dyn Fn(&ParseTree) -> i32>,
}

/// Registration-ordered sub-program registry.
#[derive(Default)]
pub(crate) struct Dispatcher {
    programs: Vec<SubProgram>,
}

impl Dispatcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub(crate) fn register(&mut self, group: NodeId, run: Box<dyn Fn(&ParseTree) -> i32>) {
        self.programs.push(SubProgram { group, run });
    }

    /// Invokes every registration whose group parsed, in registration order,
    /// stopping early only on a non-zero return code.
    pub(crate) fn execute(&self, tree: &ParseTree) -> Result<i32, DispatchError> {
        let mut last = None;
        for program in &self.programs {
            if tree.node_parsed(program.group) {
                debug!(group = %tree.path(program.group), "dispatching sub-program");
                let code = (program.run)(tree);
                last = Some(code);
                if code != 0 {
                    break;
                }
            }
        }
        last.ok_or(DispatchError::NoSubProgramMatched)
    }
}
