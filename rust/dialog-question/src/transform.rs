//! Turning declarative graphs into questions.
//!
//! A question replaces what it asks about with a `WHICH_Q_REL`-bound
//! placeholder noun and tags the graph with its kind:
//!
//! ```text
//! John met Mary in Paris.
//!   _in_p_rel(e14, e3, x15)  PROPER_Q_REL(x15)  NAMED_REL(x15, "Paris")
//! Where did John meet Mary?
//!   LOC_NONSP_REL(e14, e3, x15)  WHICH_Q_REL(x15)  PLACE_N_REL(x15)
//! ```
//!
//! Questions about a term need the term's focus; `WHY` and `HOW` questions
//! come from the graph itself.

use tracing::{debug, warn};

use dialog_mrs::role::{ARG0, ARG1, ARG2, CARG};
use dialog_mrs::{
    BY_P_MEANS_REL, FOR_P_REL, LOC_NONSP_REL, MEASURE_REL, MUCH_MANY_A_REL, Mode, Mrs, MrsError,
    Predicate, Predication, RelationCategory, Sort, Traversal, Value, VariableRef,
};

use crate::rule::role_variable;
use crate::{Config, QuestionError, QuestionKind, QuestionResult, Term, graft_frame, graft_which};

/// Generates questions for declarative graphs
#[derive(Debug, Clone)]
pub struct Transformer {
    yes_no: bool,
    manner_stop_list: Vec<String>,
}

impl Transformer {
    pub fn new(config: &Config) -> Self {
        Transformer {
            yes_no: config.yes_no,
            manner_stop_list: config.manner_stop_list.clone(),
        }
    }

    /// Every input graph followed by the questions generated from it.
    /// Interrogative graphs pass through without generating anything.
    pub fn transform(&self, graphs: Vec<Mrs>, terms: &[Term]) -> Vec<Mrs> {
        let mut output = Vec::with_capacity(graphs.len());
        for graph in graphs {
            let questions = if graph.is_declarative() {
                self.questions(&graph, terms)
            } else {
                Vec::new()
            };
            output.push(graph);
            output.extend(questions);
        }
        output
    }

    /// The questions one declarative graph yields
    pub fn questions(&self, mrs: &Mrs, terms: &[Term]) -> Vec<Mrs> {
        let mut questions = Vec::new();
        if self.yes_no {
            questions.push(ask_yes_no(mrs));
        }

        for term in terms {
            let Some(focus) = term.focus(mrs) else {
                debug!(term = %term.text, "term has no focus in graph");
                continue;
            };
            for kind in term.questions() {
                match ask_about(mrs, focus, kind) {
                    Ok(question) => questions.push(question),
                    Err(error) => warn!(term = %term.text, %kind, %error, "abandoning question"),
                }
            }
        }

        for at in manner_modifiers(mrs, &self.manner_stop_list) {
            match ask_how(mrs, at) {
                Ok(question) => questions.push(question),
                Err(error) => warn!(kind = %QuestionKind::How, %error, "abandoning question"),
            }
        }
        questions
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Transformer::new(&Config::default())
    }
}

pub fn ask_yes_no(mrs: &Mrs) -> Mrs {
    let mut question = mrs.fork();
    question.mark_interrogative(QuestionKind::YesNo.tag());
    question
}

/// Ask about `focus`: the predications binding it are replaced by the
/// placeholder noun of `kind`. `WHERE` and `WHEN` turn the preposition
/// governing the focus into `LOC_NONSP_REL`.
pub fn ask_about(mrs: &Mrs, focus: VariableRef, kind: QuestionKind) -> QuestionResult<Mrs> {
    let placeholder = match kind {
        QuestionKind::YesNo => return Ok(ask_yes_no(mrs)),
        QuestionKind::HowMany => return ask_how_many(mrs, focus),
        QuestionKind::Why => return ask_why(mrs),
        QuestionKind::How => {
            let at = manner_modifiers(mrs, &[]).into_iter().next().ok_or_else(|| {
                missing("how", mrs.variable(focus).label(), "manner modifier")
            })?;
            return ask_how(mrs, at);
        }
        QuestionKind::Who | QuestionKind::What | QuestionKind::Where | QuestionKind::When => {
            kind.placeholder().unwrap_or_default()
        }
    };

    let mut question = mrs.fork();
    let binders = question.bound_by(focus);
    let head = question
        .head_of(&binders)
        .ok_or_else(|| missing("wh", mrs.variable(focus).label(), "binding predication"))?;
    let label = question.predications()[head].label;

    if kind.is_framed() {
        match governing_preposition(&question, focus) {
            Some(at) => question.set_predicate(at, Predicate::grammar(LOC_NONSP_REL)),
            None => debug!(%kind, "focus is not the object of a preposition"),
        }
    }

    let marked = question.mark(&binders, Traversal::arguments(), Mode::Delete)?;
    question.remove(marked)?;
    graft_which(&mut question, focus, placeholder, label);
    question.mark_interrogative(kind.tag());
    Ok(question)
}

/// "John has three dogs." to "How many dogs does John have?": the
/// cardinal counting `focus` becomes a degree the question binds
pub fn ask_how_many(mrs: &Mrs, focus: VariableRef) -> QuestionResult<Mrs> {
    let mut question = mrs.fork();
    let cardinal = question
        .predications()
        .iter()
        .position(|p| {
            p.predicate.category() == RelationCategory::Cardinal
                && p.variable(ARG1)
                    .is_some_and(|counted| question.same_variable(counted, focus))
        })
        .ok_or_else(|| missing("how-many", mrs.variable(focus).label(), "CARD_REL"))?;

    let degree = role_variable(&question, cardinal, ARG0)?;
    let label = question.predications()[cardinal].label;
    question.set_predicate(cardinal, Predicate::grammar(MUCH_MANY_A_REL));
    if let Some(predication) = question.predication_mut(cardinal) {
        predication.remove_role(CARG);
    }

    let measure = question.fresh_variable(Sort::Event);
    let amount = question.fresh_variable(Sort::Individual);
    question.add_predication(
        Predication::new(Predicate::grammar(MEASURE_REL), label)
            .with_variable(ARG0, measure)
            .with_variable(ARG1, degree)
            .with_variable(ARG2, amount),
    );

    let placeholder = question.fresh_handle();
    graft_which(
        &mut question,
        amount,
        QuestionKind::HowMany.placeholder().unwrap_or_default(),
        placeholder,
    );
    question.mark_interrogative(QuestionKind::HowMany.tag());
    Ok(question)
}

/// "John ran quickly." to "How did John run?": the manner modifier at
/// `at` becomes a `_by_p_means_rel` frame whose object the question binds
pub fn ask_how(mrs: &Mrs, at: usize) -> QuestionResult<Mrs> {
    let mut question = mrs.fork();
    if question.predication(at).is_none() {
        return Err(MrsError::MissingPredication(at).into());
    }
    let means = question.fresh_variable(Sort::Individual);
    question.set_predicate(at, Predicate::lexical(BY_P_MEANS_REL));
    if let Some(predication) = question.predication_mut(at) {
        predication.set_role(ARG2, Value::Variable(means));
    }

    let placeholder = question.fresh_handle();
    graft_which(
        &mut question,
        means,
        QuestionKind::How.placeholder().unwrap_or_default(),
        placeholder,
    );
    question.mark_interrogative(QuestionKind::How.tag());
    Ok(question)
}

/// "John slept." to "Why did John sleep?": a `_for_p_rel` frame on the
/// main event whose object is a bound `REASON_REL`
pub fn ask_why(mrs: &Mrs) -> QuestionResult<Mrs> {
    let mut question = mrs.fork();
    let (index, main) = match (question.index(), question.main_predication()) {
        (Some(index), Some(main)) => (index, main),
        _ => return Err(missing("why", mrs.kind(), "main predication")),
    };
    let label = question.predications()[main].label;
    let reason = graft_frame(&mut question, Predicate::lexical(FOR_P_REL), index, label);

    let placeholder = question.fresh_handle();
    graft_which(
        &mut question,
        reason,
        QuestionKind::Why.placeholder().unwrap_or_default(),
        placeholder,
    );
    question.mark_interrogative(QuestionKind::Why.tag());
    Ok(question)
}

/// Modifiers describing how the main event happens: adjectives or adverbs
/// in the main predication's scope taking the index as `ARG1`, except
/// those whose lemma is in `stop_list`
pub fn manner_modifiers(mrs: &Mrs, stop_list: &[String]) -> Vec<usize> {
    let (Some(index), Some(main)) = (mrs.index(), mrs.main_predication()) else {
        return Vec::new();
    };
    let label = mrs.predications()[main].label;
    mrs.predications()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.label == label && p.predicate.category() == RelationCategory::Modifier)
        .filter(|(_, p)| {
            p.variable(ARG1)
                .is_some_and(|modified| mrs.same_variable(modified, index))
        })
        .filter(|(_, p)| {
            p.predicate.lexical_parts().is_some_and(|parts| {
                !stop_list
                    .iter()
                    .any(|lemma| lemma.eq_ignore_ascii_case(parts.lemma))
            })
        })
        .map(|(at, _)| at)
        .collect()
}

/// The preposition taking `focus` as its object
fn governing_preposition(mrs: &Mrs, focus: VariableRef) -> Option<usize> {
    mrs.predications().iter().position(|p| {
        p.predicate.category() == RelationCategory::Preposition
            && p.variable(ARG2)
                .is_some_and(|object| mrs.same_variable(object, focus))
    })
}

fn missing(rule: &'static str, predicate: impl Into<String>, companion: &'static str) -> QuestionError {
    QuestionError::MissingCompanion {
        rule,
        predicate: predicate.into(),
        companion,
    }
}
