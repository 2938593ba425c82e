//! Grafting question operators onto a graph.

use dialog_mrs::role::{ARG0, ARG1, ARG2, BODY, RSTR};
use dialog_mrs::{
    Handle, HandleConstraint, Mrs, Predicate, Predication, Sort, VariableRef, WHICH_Q_REL,
};

/// Bind `variable` with `WHICH_Q_REL` restricted by a placeholder noun
/// labelled `label`. Returns the placeholder's position.
///
/// ```text
/// WHICH_Q_REL(x, RSTR: h_r, BODY: h_b)   h_r qeq label
/// placeholder(x) at label
/// ```
pub fn graft_which(mrs: &mut Mrs, variable: VariableRef, placeholder: &str, label: Handle) -> usize {
    let placeholder = mrs.add_predication(
        Predication::new(Predicate::grammar(placeholder), label).with_variable(ARG0, variable),
    );

    let quantifier_label = mrs.fresh_handle();
    let restriction = mrs.fresh_variable(Sort::Handle);
    let body = mrs.fresh_variable(Sort::Handle);
    let restriction_handle = Handle(mrs.variable(restriction).id());
    mrs.add_predication(
        Predication::new(Predicate::grammar(WHICH_Q_REL), quantifier_label)
            .with_variable(ARG0, variable)
            .with_variable(RSTR, restriction)
            .with_variable(BODY, body),
    );
    mrs.add_constraint(HandleConstraint::qeq(restriction_handle, label));
    placeholder
}

/// Attach a prepositional frame to `event`, sharing the scope `label`.
/// Returns the frame's fresh object variable.
pub fn graft_frame(
    mrs: &mut Mrs,
    preposition: Predicate,
    event: VariableRef,
    label: Handle,
) -> VariableRef {
    let frame_event = mrs.fresh_variable(Sort::Event);
    let object = mrs.fresh_variable(Sort::Individual);
    mrs.add_predication(
        Predication::new(preposition, label)
            .with_variable(ARG0, frame_event)
            .with_variable(ARG1, event)
            .with_variable(ARG2, object),
    );
    object
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialog_mrs::{PERSON_REL, manner_modified};
    use pretty_assertions::assert_eq;

    #[test]
    fn it_links_the_quantifier_to_the_placeholder() {
        let mut mrs = manner_modified();
        let x = mrs.fresh_variable(Sort::Individual);
        let label = mrs.fresh_handle();
        let placeholder = graft_which(&mut mrs, x, PERSON_REL, label);

        assert_eq!(mrs.predications()[placeholder].label, label);
        let quantifier = mrs
            .predications()
            .iter()
            .find(|p| p.predicate.is(WHICH_Q_REL))
            .unwrap();
        assert_eq!(quantifier.arg0(), Some(x));

        let restriction = quantifier.variable(RSTR).unwrap();
        let restriction = mrs.variable(restriction).as_handle().unwrap();
        assert!(
            mrs.constraints()
                .contains(&HandleConstraint::qeq(restriction, label))
        );
    }

    #[test]
    fn it_attaches_frames_to_the_event() {
        let mut mrs = manner_modified();
        let event = mrs.index().unwrap();
        let before = mrs.len();
        let object = graft_frame(&mut mrs, Predicate::lexical("_for_p_rel"), event, Handle(2));

        assert_eq!(mrs.len(), before + 1);
        let frame = mrs.predications().last().unwrap();
        assert_eq!(frame.variable(ARG1), Some(event));
        assert_eq!(frame.variable(ARG2), Some(object));
        assert_eq!(mrs.variable(object).sort(), Sort::Individual);
    }
}
