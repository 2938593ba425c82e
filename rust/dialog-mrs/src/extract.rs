//! Sub-graph extraction.

use tracing::debug;

use crate::closure::{Mode, Traversal};
use crate::role::ARG0;
use crate::{Handle, Mrs, MrsError, MrsResult};

impl Mrs {
    /// A new graph holding only the closure of `focus`.
    ///
    /// The first focus predication becomes the head of the result: the top
    /// handle is pointed at its label when the old target did not survive,
    /// and its `ARG0` becomes the index when it is an event other than the
    /// current index. A new index inherits the properties of the old one it
    /// lacks, sentence force included. When the focus has no event of its
    /// own and the predication introducing the old index is not kept, the
    /// result would have no main event and `MrsError::Unresolved` is
    /// returned. `self` is left untouched.
    pub fn extract(&self, focus: &[usize], traversal: Traversal) -> MrsResult<Mrs> {
        let head = *focus.first().ok_or(MrsError::MissingPredication(0))?;
        let mut extracted = self.fork();
        let (label, arg0, predicate) = {
            let predication = extracted
                .predication(head)
                .ok_or(MrsError::MissingPredication(head))?;
            (
                predication.label,
                predication.arg0(),
                predication.predicate.to_string(),
            )
        };

        let index_bound = extracted
            .index()
            .is_some_and(|index| !extracted.bound_by(index).is_empty());

        let marked = extracted.mark(focus, traversal, Mode::Keep)?;
        let removed = extracted.remove(marked)?;

        let top_survived = extracted
            .top_target()
            .is_some_and(|target| !extracted.labelled(target).is_empty());
        if !top_survived {
            extracted.retarget_top(label);
        }

        if let Some(arg0) = arg0
            && extracted.variable(arg0).is_event()
            && extracted
                .index()
                .is_none_or(|index| !extracted.same_variable(index, arg0))
        {
            if let Some(previous) = extracted.index() {
                extracted.inherit_properties(arg0, previous);
            }
            extracted.set_index(arg0);
        }

        if index_bound
            && extracted
                .index()
                .is_some_and(|index| extracted.bound_by(index).is_empty())
        {
            return Err(MrsError::Unresolved {
                predicate,
                role: ARG0.to_string(),
            });
        }

        debug!(%label, removed, remaining = extracted.len(), "extracted sub-graph");
        Ok(extracted)
    }

    /// Extract the scope a label names: the head predication carrying the
    /// label is the focus
    pub fn extract_label(&self, label: Handle, traversal: Traversal) -> MrsResult<Mrs> {
        let members = self.resolve_handle(label)?;
        let head = self
            .head_of(&members)
            .ok_or(MrsError::UnresolvedHandle { hi: label, lo: label })?;
        let mut focus = vec![head];
        focus.extend(members.into_iter().filter(|&at| at != head));
        self.extract(&focus, traversal)
    }
}

#[cfg(test)]
mod tests {
    use crate::closure::Traversal;
    use crate::role::ARG0;
    use crate::{Handle, Mrs, MrsError, coordinated_events, write};
    use pretty_assertions::assert_eq;

    fn names(mrs: &Mrs) -> Vec<&str> {
        mrs.predications()
            .iter()
            .map(|p| p.predicate.name())
            .collect()
    }

    #[test]
    fn it_extracts_a_conjunct_as_a_standalone_graph() {
        let mrs = coordinated_events();
        let hate = mrs
            .predications()
            .iter()
            .position(|p| p.predicate.is("_hate_v_1_rel"))
            .unwrap();

        let extracted = mrs.extract(&[hate], Traversal::all()).unwrap();

        assert_eq!(
            names(&extracted),
            vec![
                "PROPER_Q_REL",
                "NAMED_REL",
                "_hate_v_1_rel",
                "PROPER_Q_REL",
                "NAMED_REL",
            ]
        );
        assert_eq!(extracted.top_target(), Some(Handle(14)));
        let index = extracted.index().unwrap();
        assert_eq!(extracted.variable(index).label(), "e13");
        assert_eq!(
            extracted.predications()[2].arg0(),
            Some(index),
            "index must be the conjunct's own event"
        );
        assert_eq!(extracted.variable(index).property("SF"), Some("PROP"));
        assert_eq!(extracted.variable(index).property("TENSE"), Some("PRES"));
        assert!(extracted.predications()[2].variable(ARG0).is_some());
    }

    #[test]
    fn it_leaves_the_source_untouched() {
        let mrs = coordinated_events();
        let before = write(&mrs).unwrap();
        let like = mrs
            .predications()
            .iter()
            .position(|p| p.predicate.is("_like_v_1_rel"))
            .unwrap();

        let extracted = mrs.extract(&[like], Traversal::all()).unwrap();

        assert_eq!(write(&mrs).unwrap(), before);
        assert_eq!(extracted.len(), 5);
    }

    #[test]
    fn it_extracts_by_label() {
        let mrs = coordinated_events();
        let extracted = mrs.extract_label(Handle(11), Traversal::all()).unwrap();
        assert!(extracted.predications().iter().any(|p| p.predicate.is("_like_v_1_rel")));
        assert!(!extracted.predications().iter().any(|p| p.predicate.is("_hate_v_1_rel")));
    }

    #[test]
    fn it_refuses_to_orphan_the_index() {
        let mrs = coordinated_events();
        let john = mrs
            .predications()
            .iter()
            .position(|p| p.predicate.is("NAMED_REL"))
            .unwrap();

        let error = mrs.extract(&[john], Traversal::all()).unwrap_err();
        assert!(matches!(error, MrsError::Unresolved { ref role, .. } if role == "ARG0"));
    }
}
