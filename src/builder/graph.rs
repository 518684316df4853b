//! Immutable step graph implementing the wizard state machine contract.

use crate::builder::error::BuildError;
use crate::builder::step::StepBuilder;
use crate::core::{
    Guard, StepDefinition, StepId, Transition, WizardContext, WizardEvent,
    WizardInternalState, WizardStateMachine,
};
use std::collections::BTreeMap;
use std::sync::Arc;

struct StepNode<T> {
    definition: StepDefinition,
    routes: Vec<(Guard<T>, StepId)>,
}

impl<T> StepNode<T> {
    fn next_for(&self, values: &T) -> Option<&str> {
        self.routes
            .iter()
            .find(|(guard, _)| guard.check(values))
            .map(|(_, step)| step.as_str())
            .or_else(|| self.definition.target(Transition::Next))
    }
}

struct Graph<T> {
    order: Vec<StepId>,
    nodes: BTreeMap<StepId, StepNode<T>>,
}

/// A wizard step graph positioned at one step.
///
/// The graph itself is shared behind an `Arc`; a transition only produces a
/// new cursor. Requests the active step does not declare, and GOTO requests
/// for undefined steps, return a graph at the same step.
///
/// # Example
///
/// ```rust
/// use stepwise::builder::StepGraph;
/// use stepwise::core::{Transition, WizardEvent, WizardStateMachine};
///
/// struct Lc {
///     direct: bool,
/// }
///
/// let graph: StepGraph<Lc> = StepGraph::builder()
///     .step("PARTICIPANTS", |s| {
///         s.fields(["applicantId", "direct"])
///             .next_when(|v: &Lc| v.direct, "LC_TYPE")
///             .next("ADVISING_BANK")
///     })
///     .step("ADVISING_BANK", |s| s.previous("PARTICIPANTS").next("LC_TYPE"))
///     .step("LC_TYPE", |s| s.previous("PARTICIPANTS"))
///     .initial("PARTICIPANTS")
///     .build()
///     .unwrap();
///
/// let direct = graph.transition_to(Transition::Next, WizardEvent::Form { values: &Lc { direct: true } });
/// let advised = graph.transition_to(Transition::Next, WizardEvent::Form { values: &Lc { direct: false } });
///
/// assert_eq!(direct.current_step(), "LC_TYPE");
/// assert_eq!(advised.current_step(), "ADVISING_BANK");
/// ```
pub struct StepGraph<T> {
    graph: Arc<Graph<T>>,
    current: StepId,
}

impl<T> Clone for StepGraph<T> {
    fn clone(&self) -> Self {
        Self {
            graph: Arc::clone(&self.graph),
            current: self.current.clone(),
        }
    }
}

impl<T> std::fmt::Debug for StepGraph<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepGraph")
            .field("current", &self.current)
            .field("steps", &self.graph.order)
            .finish()
    }
}

impl<T> StepGraph<T> {
    pub fn builder() -> StepGraphBuilder<T> {
        StepGraphBuilder::new()
    }

    /// The same graph positioned at `step`, or `None` if it is undefined.
    pub fn at(&self, step: &str) -> Option<Self> {
        self.graph.nodes.contains_key(step).then(|| Self {
            graph: Arc::clone(&self.graph),
            current: step.to_string(),
        })
    }

    /// Every step in declaration order.
    pub fn steps(&self) -> &[StepId] {
        &self.graph.order
    }

    fn moved_to(&self, target: Option<&str>) -> Self {
        match target {
            Some(step) => Self {
                graph: Arc::clone(&self.graph),
                current: step.to_string(),
            },
            None => self.clone(),
        }
    }
}

impl<T> WizardStateMachine<T> for StepGraph<T> {
    fn transition_to(&self, transition: Transition, event: WizardEvent<'_, T>) -> Self {
        let Some(node) = self.graph.nodes.get(&self.current) else {
            return self.clone();
        };

        let target = match (transition, event) {
            (Transition::Next, WizardEvent::Form { values }) => node.next_for(values),
            (Transition::Next, WizardEvent::Goto { .. }) => node.definition.target(Transition::Next),
            (Transition::Previous, _) => node.definition.target(Transition::Previous),
            (Transition::Goto, WizardEvent::Goto { step }) => {
                self.graph.nodes.contains_key(step).then_some(step)
            }
            (Transition::Goto, WizardEvent::Form { .. }) => None,
        };

        self.moved_to(target)
    }

    fn value_of(&self) -> WizardInternalState {
        let states: BTreeMap<StepId, StepDefinition> = self
            .graph
            .nodes
            .iter()
            .map(|(id, node)| (id.clone(), node.definition.clone()))
            .collect();
        let fields = states
            .get(&self.current)
            .map(|def| def.fields.clone())
            .unwrap_or_default();

        WizardInternalState {
            step: self.current.clone(),
            states,
            context: WizardContext {
                fields,
                steps: self.graph.order.clone(),
            },
        }
    }

    fn current_step(&self) -> StepId {
        self.current.clone()
    }
}

/// Builder for [`StepGraph`].
pub struct StepGraphBuilder<T> {
    steps: Vec<(StepId, StepBuilder<T>)>,
    initial: Option<StepId>,
}

impl<T> StepGraphBuilder<T> {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            initial: None,
        }
    }

    /// Linear chain: each step's NEXT is the following step and PREVIOUS the
    /// preceding one. The first step becomes the initial step.
    pub fn linear(steps: Vec<(&str, Vec<&str>)>) -> Self {
        let ids: Vec<&str> = steps.iter().map(|(id, _)| *id).collect();
        let mut builder = Self::new();

        for (index, (id, fields)) in steps.iter().enumerate() {
            let mut step = StepBuilder::new().fields(fields.iter().copied());
            if let Some(prev) = index.checked_sub(1).map(|i| ids[i]) {
                step = step.previous(prev);
            }
            if let Some(next) = ids.get(index + 1) {
                step = step.next(*next);
            }
            builder = builder.add_step(*id, step);
        }

        match ids.first() {
            Some(first) => builder.initial(*first),
            None => builder,
        }
    }

    /// Add a step configured through a closure.
    pub fn step<F>(self, id: impl Into<StepId>, configure: F) -> Self
    where
        F: FnOnce(StepBuilder<T>) -> StepBuilder<T>,
    {
        self.add_step(id, configure(StepBuilder::new()))
    }

    /// Add a prebuilt step.
    pub fn add_step(mut self, id: impl Into<StepId>, step: StepBuilder<T>) -> Self {
        self.steps.push((id.into(), step));
        self
    }

    /// Set the initial step (required).
    pub fn initial(mut self, step: impl Into<StepId>) -> Self {
        self.initial = Some(step.into());
        self
    }

    /// Build the graph, checking that every referenced step exists.
    pub fn build(self) -> Result<StepGraph<T>, BuildError> {
        if self.steps.is_empty() {
            return Err(BuildError::NoSteps);
        }
        let initial = self.initial.ok_or(BuildError::MissingInitialStep)?;

        let mut order = Vec::with_capacity(self.steps.len());
        let mut nodes = BTreeMap::new();
        for (id, step) in self.steps {
            if nodes.contains_key(&id) {
                return Err(BuildError::DuplicateStep(id));
            }
            if !step.routes.is_empty() && step.next.is_none() {
                return Err(BuildError::RouteWithoutDefault(id));
            }
            let mut on = BTreeMap::new();
            if let Some(next) = step.next {
                on.insert(Transition::Next, next);
            }
            if let Some(previous) = step.previous {
                on.insert(Transition::Previous, previous);
            }
            order.push(id.clone());
            nodes.insert(
                id,
                StepNode {
                    definition: StepDefinition {
                        on,
                        fields: step.fields,
                    },
                    routes: step.routes,
                },
            );
        }

        if !nodes.contains_key(&initial) {
            return Err(BuildError::UnknownInitialStep(initial));
        }
        for (id, node) in &nodes {
            let declared = node.definition.on.iter().map(|(t, s)| (*t, s));
            let routed = node.routes.iter().map(|(_, s)| (Transition::Next, s));
            for (transition, to) in declared.chain(routed) {
                if !nodes.contains_key(to) {
                    return Err(BuildError::UnknownTarget {
                        from: id.clone(),
                        transition,
                        to: to.clone(),
                    });
                }
            }
        }

        Ok(StepGraph {
            graph: Arc::new(Graph { order, nodes }),
            current: initial,
        })
    }
}

impl<T> Default for StepGraphBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter_of_credit() -> StepGraph<()> {
        StepGraphBuilder::linear(vec![
            ("SUMMARY_OF_TRADE", vec!["tradeId"]),
            ("CARGO_MOVEMENTS", vec!["cargoIds"]),
            ("PARTICIPANTS", vec!["applicantId", "feesPayableBy"]),
            ("REVIEW", vec![]),
        ])
        .build()
        .unwrap()
    }

    fn form() -> WizardEvent<'static, ()> {
        WizardEvent::Form { values: &() }
    }

    #[test]
    fn builder_requires_steps() {
        let result = StepGraphBuilder::<()>::new().initial("A").build();
        assert!(matches!(result, Err(BuildError::NoSteps)));
    }

    #[test]
    fn builder_requires_initial_step() {
        let result = StepGraphBuilder::<()>::new().step("A", |s| s).build();
        assert!(matches!(result, Err(BuildError::MissingInitialStep)));
    }

    #[test]
    fn builder_rejects_unknown_initial_step() {
        let result = StepGraphBuilder::<()>::new()
            .step("A", |s| s)
            .initial("B")
            .build();
        assert_eq!(result.unwrap_err(), BuildError::UnknownInitialStep("B".into()));
    }

    #[test]
    fn builder_rejects_duplicate_steps() {
        let result = StepGraphBuilder::<()>::new()
            .step("A", |s| s)
            .step("A", |s| s)
            .initial("A")
            .build();
        assert_eq!(result.unwrap_err(), BuildError::DuplicateStep("A".into()));
    }

    #[test]
    fn builder_rejects_dangling_targets() {
        let result = StepGraphBuilder::<()>::new()
            .step("A", |s| s.next("B"))
            .initial("A")
            .build();
        assert_eq!(
            result.unwrap_err(),
            BuildError::UnknownTarget {
                from: "A".into(),
                transition: Transition::Next,
                to: "B".into(),
            }
        );
    }

    #[test]
    fn builder_rejects_routes_without_default() {
        let result = StepGraphBuilder::<()>::new()
            .step("A", |s| s.next_when(|_| true, "B"))
            .step("B", |s| s)
            .initial("A")
            .build();
        assert_eq!(result.unwrap_err(), BuildError::RouteWithoutDefault("A".into()));
    }

    #[test]
    fn linear_chain_links_neighbours() {
        let graph = letter_of_credit();
        let state = graph.value_of();

        assert_eq!(state.step, "SUMMARY_OF_TRADE");
        assert_eq!(state.context.fields, vec!["tradeId"]);
        assert_eq!(
            state.context.steps,
            vec!["SUMMARY_OF_TRADE", "CARGO_MOVEMENTS", "PARTICIPANTS", "REVIEW"]
        );
        assert_eq!(
            state.states["CARGO_MOVEMENTS"].target(Transition::Previous),
            Some("SUMMARY_OF_TRADE")
        );
        assert_eq!(state.states["REVIEW"].target(Transition::Next), None);
    }

    #[test]
    fn transition_returns_new_machine() {
        let graph = letter_of_credit();

        let next = graph.transition_to(Transition::Next, form());

        assert_eq!(graph.current_step(), "SUMMARY_OF_TRADE");
        assert_eq!(next.current_step(), "CARGO_MOVEMENTS");
        assert_eq!(next.value_of().context.fields, vec!["cargoIds"]);
    }

    #[test]
    fn missing_transition_is_a_no_op() {
        let first = letter_of_credit();
        let last = first.at("REVIEW").unwrap();

        assert_eq!(
            first.transition_to(Transition::Previous, form()).current_step(),
            "SUMMARY_OF_TRADE"
        );
        assert_eq!(
            last.transition_to(Transition::Next, form()).current_step(),
            "REVIEW"
        );
    }

    #[test]
    fn goto_jumps_to_defined_steps_only() {
        let graph = letter_of_credit();

        let review = graph.transition_to(Transition::Goto, WizardEvent::Goto { step: "REVIEW" });
        let nowhere = graph.transition_to(Transition::Goto, WizardEvent::Goto { step: "NOWHERE" });

        assert_eq!(review.current_step(), "REVIEW");
        assert_eq!(nowhere.current_step(), "SUMMARY_OF_TRADE");
    }

    #[test]
    fn goto_without_step_payload_is_ignored() {
        let graph = letter_of_credit();

        let same = graph.transition_to(Transition::Goto, form());

        assert_eq!(same.current_step(), "SUMMARY_OF_TRADE");
    }

    #[test]
    fn routes_pick_first_matching_guard() {
        let graph: StepGraph<u32> = StepGraph::builder()
            .step("AMOUNT", |s| {
                s.next_when(|v: &u32| *v >= 1_000_000, "CREDIT_COMMITTEE")
                    .next_when(|v: &u32| *v >= 1_000, "DESK_REVIEW")
                    .next("SUBMIT")
            })
            .step("CREDIT_COMMITTEE", |s| s.previous("AMOUNT"))
            .step("DESK_REVIEW", |s| s.previous("AMOUNT"))
            .step("SUBMIT", |s| s.previous("AMOUNT"))
            .initial("AMOUNT")
            .build()
            .unwrap();

        let step_for = |amount: u32| {
            graph
                .transition_to(Transition::Next, WizardEvent::Form { values: &amount })
                .current_step()
        };

        assert_eq!(step_for(2_000_000), "CREDIT_COMMITTEE");
        assert_eq!(step_for(5_000), "DESK_REVIEW");
        assert_eq!(step_for(10), "SUBMIT");
        assert_eq!(
            graph.value_of().states["AMOUNT"].target(Transition::Next),
            Some("SUBMIT")
        );
    }

    #[test]
    fn at_rejects_unknown_step() {
        let graph = letter_of_credit();

        assert!(graph.at("NOWHERE").is_none());
        assert_eq!(graph.at("PARTICIPANTS").unwrap().current_step(), "PARTICIPANTS");
    }
}
