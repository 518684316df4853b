//! Macros for ergonomic step graph construction.

/// Build a linear wizard: every step links NEXT to the following step and
/// PREVIOUS to the preceding one. Expands to a
/// [`StepGraphBuilder`](crate::builder::StepGraphBuilder) whose initial step is
/// the first one listed.
///
/// # Example
///
/// ```
/// use stepwise::builder::StepGraph;
/// use stepwise::core::WizardStateMachine;
/// use stepwise::linear_wizard;
///
/// let graph: StepGraph<()> = linear_wizard! {
///     SUMMARY_OF_TRADE => [tradeId],
///     CARGO_MOVEMENTS => [cargoIds],
///     REVIEW => [],
/// }
/// .build()
/// .unwrap();
///
/// assert_eq!(graph.current_step(), "SUMMARY_OF_TRADE");
/// ```
#[macro_export]
macro_rules! linear_wizard {
    (
        $(
            $step:ident => [ $( $field:ident ),* $(,)? ]
        ),+ $(,)?
    ) => {
        $crate::builder::StepGraphBuilder::linear(::std::vec![
            $(
                (
                    stringify!($step),
                    ::std::vec![ $( stringify!($field) ),* ],
                )
            ),+
        ])
    };
}
