/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! the engine's run state machine (spec §4.J): `New -> Configured ->
//! DatabasesLoaded -> Analyzing -> Produced | Failed`. Transitions are
//! monotonic; `Failed` is terminal for that run.

use crate::errors::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    New,
    Configured,
    DatabasesLoaded,
    Analyzing,
    Produced,
    Failed,
}

impl EngineState {
    fn label(&self) -> &'static str {
        match self {
            EngineState::New => "New",
            EngineState::Configured => "Configured",
            EngineState::DatabasesLoaded => "DatabasesLoaded",
            EngineState::Analyzing => "Analyzing",
            EngineState::Produced => "Produced",
            EngineState::Failed => "Failed",
        }
    }

    /// whether moving from `self` to `next` is a legal step of the state
    /// machine. `Failed` is reachable from anywhere (a run can fail at any
    /// stage) but is terminal; every other step must follow the declared
    /// order exactly.
    fn can_advance_to(&self, next: EngineState) -> bool {
        if next == EngineState::Failed {
            return *self != EngineState::Failed;
        }
        matches!(
            (self, next),
            (EngineState::New, EngineState::Configured)
                | (EngineState::Configured, EngineState::DatabasesLoaded)
                | (EngineState::DatabasesLoaded, EngineState::Analyzing)
                | (EngineState::Analyzing, EngineState::Produced)
        )
    }

    pub fn advance(&mut self, next: EngineState) -> Result<(), EngineError> {
        if !self.can_advance_to(next) {
            return Err(EngineError::IllegalTransition { from: self.label(), to: next.label() });
        }
        *self = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_the_declared_order() {
        let mut state = EngineState::New;
        state.advance(EngineState::Configured).unwrap();
        state.advance(EngineState::DatabasesLoaded).unwrap();
        state.advance(EngineState::Analyzing).unwrap();
        state.advance(EngineState::Produced).unwrap();
        assert_eq!(state, EngineState::Produced);
    }

    #[test]
    fn rejects_skipping_a_stage() {
        let mut state = EngineState::New;
        assert!(state.advance(EngineState::DatabasesLoaded).is_err());
    }

    #[test]
    fn failed_is_terminal() {
        let mut state = EngineState::Analyzing;
        state.advance(EngineState::Failed).unwrap();
        assert!(state.advance(EngineState::Produced).is_err());
    }

    #[test]
    fn any_stage_can_fail() {
        let mut state = EngineState::Configured;
        assert!(state.advance(EngineState::Failed).is_ok());
    }
}
