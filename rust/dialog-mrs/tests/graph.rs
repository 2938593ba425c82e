use std::collections::BTreeSet;

use anyhow::Result;
use dialog_mrs::role::{ARG1, is_argument_role};
use dialog_mrs::{Handle, Mode, Mrs, Sort, Traversal, Value, read, write};
use pretty_assertions::assert_eq;

const COORDINATED_EVENTS: &str = include_str!("fixtures/coordinated_events.mrx");

fn position(mrs: &Mrs, name: &str) -> usize {
    mrs.predications()
        .iter()
        .position(|p| p.predicate.is(name))
        .unwrap_or_else(|| panic!("{name} not in graph"))
}

fn used_ids(mrs: &Mrs) -> BTreeSet<u32> {
    let mut ids = BTreeSet::from([mrs.top().id()]);
    for predication in mrs.predications() {
        ids.insert(predication.label.id());
        for variable in predication.variables() {
            ids.insert(mrs.variable(variable).id());
        }
    }
    for constraint in mrs.constraints() {
        ids.insert(constraint.hi.id());
        ids.insert(constraint.lo().id());
    }
    if let Some(index) = mrs.index_variable() {
        ids.insert(index.id());
    }
    ids
}

fn assert_constraints_consistent(mrs: &Mrs) {
    let labels: BTreeSet<Handle> = mrs.predications().iter().map(|p| p.label).collect();
    let mut outer = labels.clone();
    outer.insert(mrs.top());
    for predication in mrs.predications() {
        for variable in predication.variables() {
            if let Some(handle) = mrs.variable(variable).as_handle() {
                outer.insert(handle);
            }
        }
    }
    for constraint in mrs.constraints() {
        assert!(outer.contains(&constraint.hi), "dangling outer handle in {constraint}");
        assert!(labels.contains(&constraint.lo()), "dangling target in {constraint}");
    }
}

#[test]
fn shared_individuals_see_each_others_properties() -> Result<()> {
    let mut mrs = read(COORDINATED_EVENTS)?;
    let like = position(&mrs, "_like_v_1_rel");
    let hate = position(&mrs, "_hate_v_1_rel");

    let liker = mrs.predications()[like].variable(ARG1).unwrap();
    let hater = mrs.predications()[hate].variable(ARG1).unwrap();
    assert_eq!(liker, hater);

    mrs.variable_mut(liker).set_property("GEND", "M");
    assert_eq!(mrs.variable(hater).property("GEND"), Some("M"));
    assert_eq!(mrs.variable(hater).property("NUM"), Some("SG"));
    Ok(())
}

#[test]
fn fresh_ids_never_collide() -> Result<()> {
    let mut mrs = read(COORDINATED_EVENTS)?;
    let used = used_ids(&mrs);
    for n in 0..12 {
        let fresh = mrs.fresh_ids(n);
        assert_eq!(fresh.len(), n);
        assert_eq!(fresh.iter().collect::<BTreeSet<_>>().len(), n);
        assert!(fresh.iter().all(|id| !used.contains(id)));
    }

    let first = mrs.fresh_variable(Sort::Individual);
    let second = mrs.fresh_handle();
    assert_ne!(mrs.variable(first).id(), second.id());
    assert!(!used.contains(&second.id()));
    Ok(())
}

#[test]
fn cleanup_leaves_only_consistent_constraints() -> Result<()> {
    let mut mrs = read(COORDINATED_EVENTS)?;
    let hate = position(&mrs, "_hate_v_1_rel");
    let marked = mrs.mark(&[hate], Traversal::all(), Mode::Delete)?;
    mrs.remove(marked)?;
    assert_constraints_consistent(&mrs);

    let and = position(&mrs, "_and_c_rel");
    let marked = mrs.marked([and]);
    mrs.remove(marked)?;
    assert_constraints_consistent(&mrs);
    assert!(mrs.constraints().iter().all(|c| c.hi != mrs.top()));
    Ok(())
}

#[test]
fn forks_do_not_share_state() -> Result<()> {
    let mrs = read(COORDINATED_EVENTS)?;
    let before = write(&mrs)?;

    let mut fork = mrs.fork();
    fork.set_index_property("SF", "QUES");
    let like = position(&fork, "_like_v_1_rel");
    let liker = fork.predications()[like].variable(ARG1).unwrap();
    fork.variable_mut(liker).set_property("PERS", "1");
    let marked = fork.marked([like]);
    fork.remove(marked)?;

    assert_eq!(write(&mrs)?, before);
    assert_ne!(write(&fork)?, before);
    Ok(())
}

#[test]
fn deleting_a_closure_never_strands_arguments() -> Result<()> {
    let mrs = read(COORDINATED_EVENTS)?;
    for focus in 0..mrs.len() {
        let mut stripped = mrs.fork();
        let marked = stripped.mark(&[focus], Traversal::arguments(), Mode::Delete)?;
        stripped.remove(marked)?;
        assert!(stripped.len() < mrs.len());

        for predication in stripped.predications() {
            for pair in predication.roles.iter().filter(|pair| is_argument_role(&pair.role)) {
                match &pair.value {
                    Value::Constant(_) => {}
                    Value::Variable(variable) if stripped.variable(*variable).is_handle() => {}
                    Value::Variable(variable) => assert!(
                        !stripped.bound_by(*variable).is_empty(),
                        "{} of {} is stranded after removing #{focus}",
                        pair.role,
                        predication.predicate
                    ),
                }
            }
        }
    }
    Ok(())
}

#[test]
fn marks_go_stale_after_edits() -> Result<()> {
    let mut mrs = read(COORDINATED_EVENTS)?;
    let marked = mrs.marked([0]);
    let again = marked.clone();
    mrs.remove(marked)?;
    assert!(matches!(
        mrs.remove(again),
        Err(dialog_mrs::MrsError::StaleMark { .. })
    ));
    Ok(())
}

#[test]
fn documents_survive_a_round_trip() -> Result<()> {
    let mrs = read(COORDINATED_EVENTS)?;
    let written = write(&mrs)?;
    let reread = read(&written)?;

    assert_eq!(reread.len(), mrs.len());
    assert_eq!(reread.constraints(), mrs.constraints());
    for (left, right) in mrs.predications().iter().zip(reread.predications()) {
        assert_eq!(left.predicate, right.predicate);
        assert_eq!(left.label, right.label);
        assert_eq!(left.span, right.span);
        assert_eq!(left.roles.len(), right.roles.len());
    }
    assert_eq!(write(&reread)?, written);
    Ok(())
}
