//! Hand-built graphs for tests.
//!
//! Each fixture mirrors what the grammar produces for the sentence in its
//! doc comment, trimmed to the predications the rewrite rules care about.

use crate::role::{ARG0, CARG};
use crate::{
    Handle, HandleConstraint, Mrs, Predicate, Predication, Span, Variable, VariableRef, parse_label,
};

/// Terse builder for fixture graphs. Role values are written as labels
/// (`"x6"`, `"h5"`); a value starting with `"` is a constant.
pub struct GraphBuilder {
    mrs: Mrs,
}

impl GraphBuilder {
    pub fn new(top: u32) -> Self {
        GraphBuilder {
            mrs: Mrs::new(Handle(top)),
        }
    }

    /// The arena slot for a label, created on first use
    pub fn var(&mut self, label: &str) -> VariableRef {
        let (sort, id) = parse_label(label).expect("Fixture variable label is malformed");
        self.mrs.add_variable(Variable::new(sort, id))
    }

    pub fn index(mut self, label: &str, properties: &[(&str, &str)]) -> Self {
        let index = self.var(label);
        for (name, value) in properties {
            self.mrs.variable_mut(index).set_property(*name, *value);
        }
        self.mrs.set_index(index);
        self
    }

    pub fn property(mut self, label: &str, name: &str, value: &str) -> Self {
        let variable = self.var(label);
        self.mrs.variable_mut(variable).set_property(name, value);
        self
    }

    pub fn ep(
        mut self,
        name: &str,
        label: u32,
        span: (usize, usize),
        roles: &[(&str, &str)],
    ) -> Self {
        let mut predication = Predication::new(Predicate::parse(name), Handle(label))
            .with_span(Span::new(span.0, span.1));
        for (role, value) in roles {
            if let Some(constant) = value.strip_prefix('"') {
                predication = predication.with_constant(*role, constant.trim_end_matches('"'));
            } else {
                let variable = self.var(value);
                predication = predication.with_variable(*role, variable);
            }
        }
        self.mrs.add_predication(predication);
        self
    }

    pub fn qeq(mut self, hi: u32, lo: u32) -> Self {
        self.mrs.add_constraint(HandleConstraint::qeq(Handle(hi), Handle(lo)));
        self
    }

    pub fn build(mut self) -> Mrs {
        self.mrs.unify_coreferences();
        self.mrs
    }
}

/// `PROPER_Q_REL` plus `NAMED_REL` for a proper noun. `labels` are the
/// quantifier label, its `RSTR` and `BODY` handles and the name's label.
fn proper_name(
    builder: GraphBuilder,
    name: &str,
    x: &str,
    labels: [u32; 4],
    span: (usize, usize),
) -> GraphBuilder {
    let [quantifier, rstr, body, named] = labels;
    let rstr_label = format!("h{rstr}");
    let body_label = format!("h{body}");
    let constant = format!("\"{name}\"");
    builder
        .ep(
            "PROPER_Q_REL",
            quantifier,
            span,
            &[(ARG0, x), ("RSTR", rstr_label.as_str()), ("BODY", body_label.as_str())],
        )
        .ep("NAMED_REL", named, span, &[(ARG0, x), (CARG, constant.as_str())])
        .qeq(rstr, named)
}

/// "John likes Mary and hates Anna."
pub fn coordinated_events() -> Mrs {
    let builder = GraphBuilder::new(1).index("e3", &[("SF", "PROP"), ("TENSE", "PRES")]);
    let builder = proper_name(builder, "John", "x6", [4, 5, 7, 8], (0, 4))
        .ep(
            "_like_v_1_rel",
            11,
            (5, 10),
            &[(ARG0, "e10"), ("ARG1", "x6"), ("ARG2", "x15")],
        )
        .property("e10", "TENSE", "PRES");
    let builder = proper_name(builder, "Mary", "x15", [16, 17, 18, 19], (11, 15))
        .ep(
            "_and_c_rel",
            2,
            (16, 19),
            &[
                (ARG0, "e3"),
                ("L-INDEX", "e10"),
                ("R-INDEX", "e13"),
                ("L-HNDL", "h11"),
                ("R-HNDL", "h14"),
            ],
        )
        .ep(
            "_hate_v_1_rel",
            14,
            (20, 25),
            &[(ARG0, "e13"), ("ARG1", "x6"), ("ARG2", "x20")],
        )
        .property("e13", "TENSE", "PRES");
    proper_name(builder, "Anna", "x20", [21, 22, 23, 24], (26, 30))
        .qeq(1, 2)
        .build()
}

/// "the girl Anna likes dogs."
pub fn apposition() -> Mrs {
    let builder = GraphBuilder::new(1)
        .index("e3", &[("SF", "PROP"), ("TENSE", "PRES")])
        .ep(
            "_the_q_rel",
            4,
            (0, 3),
            &[(ARG0, "x6"), ("RSTR", "h5"), ("BODY", "h7")],
        )
        .ep("_girl_n_1_rel", 8, (4, 8), &[(ARG0, "x6")])
        .ep(
            "APPOS_REL",
            8,
            (4, 13),
            &[(ARG0, "e9"), ("ARG1", "x6"), ("ARG2", "x10")],
        );
    proper_name(builder, "Anna", "x10", [11, 12, 13, 14], (9, 13))
        .ep(
            "_like_v_1_rel",
            15,
            (14, 19),
            &[(ARG0, "e3"), ("ARG1", "x6"), ("ARG2", "x16")],
        )
        .ep(
            "UDEF_Q_REL",
            17,
            (20, 24),
            &[(ARG0, "x16"), ("RSTR", "h18"), ("BODY", "h19")],
        )
        .ep("_dog_n_1_rel", 20, (20, 24), &[(ARG0, "x16")])
        .qeq(1, 15)
        .qeq(5, 8)
        .qeq(18, 20)
        .build()
}

/// "the dog that barked ran."
pub fn relative_clause() -> Mrs {
    GraphBuilder::new(1)
        .index("e2", &[("SF", "PROP"), ("TENSE", "PAST")])
        .ep(
            "_the_q_rel",
            4,
            (0, 3),
            &[(ARG0, "x6"), ("RSTR", "h5"), ("BODY", "h7")],
        )
        .ep("_dog_n_1_rel", 8, (4, 7), &[(ARG0, "x6")])
        .ep(
            "_bark_v_1_rel",
            8,
            (13, 19),
            &[(ARG0, "e9"), ("ARG1", "x6")],
        )
        .property("e9", "TENSE", "PAST")
        .ep(
            "_run_v_1_rel",
            10,
            (20, 23),
            &[(ARG0, "e2"), ("ARG1", "x6")],
        )
        .qeq(1, 10)
        .qeq(5, 8)
        .build()
}

fn clause_pair(conjunction: &str) -> Mrs {
    let builder = GraphBuilder::new(1).index("e3", &[("SF", "PROP"), ("TENSE", "PAST")]);
    let builder = proper_name(builder, "John", "x6", [4, 5, 7, 8], (0, 4))
        .ep("_sleep_v_1_rel", 9, (5, 10), &[(ARG0, "e10"), ("ARG1", "x6")])
        .property("e10", "TENSE", "PAST")
        .ep(
            conjunction,
            2,
            (11, 18),
            &[(ARG0, "e3"), ("ARG1", "h11"), ("ARG2", "h12")],
        );
    proper_name(builder, "Mary", "x15", [13, 14, 16, 17], (19, 23))
        .ep("_work_v_1_rel", 18, (24, 30), &[(ARG0, "e19"), ("ARG1", "x15")])
        .property("e19", "TENSE", "PAST")
        .qeq(1, 2)
        .qeq(11, 9)
        .qeq(12, 18)
        .build()
}

/// "John slept while Mary worked."
pub fn subordinate_clause() -> Mrs {
    clause_pair("_while_x_rel")
}

/// "John slept because Mary worked."
pub fn causal_clause() -> Mrs {
    clause_pair("_because_x_rel")
}

/// "John slept if Mary worked."
pub fn conditional_clause() -> Mrs {
    clause_pair("_if_x_then_rel")
}

/// "John met Mary in Paris."
pub fn located_event() -> Mrs {
    let builder = GraphBuilder::new(1).index("e3", &[("SF", "PROP"), ("TENSE", "PAST")]);
    let builder = proper_name(builder, "John", "x6", [4, 5, 7, 8], (0, 4)).ep(
        "_meet_v_1_rel",
        2,
        (5, 8),
        &[(ARG0, "e3"), ("ARG1", "x6"), ("ARG2", "x9")],
    );
    let builder = proper_name(builder, "Mary", "x9", [10, 11, 12, 13], (9, 13)).ep(
        "_in_p_rel",
        2,
        (14, 16),
        &[(ARG0, "e14"), ("ARG1", "e3"), ("ARG2", "x15")],
    );
    proper_name(builder, "Paris", "x15", [16, 17, 18, 19], (17, 22))
        .qeq(1, 2)
        .build()
}

/// "John and Mary slept."
pub fn coordinated_individuals() -> Mrs {
    let builder = GraphBuilder::new(1).index("e3", &[("SF", "PROP"), ("TENSE", "PAST")]);
    let builder = proper_name(builder, "John", "x6", [4, 5, 7, 8], (0, 4))
        .ep(
            "UDEF_Q_REL",
            9,
            (0, 13),
            &[(ARG0, "x10"), ("RSTR", "h11"), ("BODY", "h12")],
        )
        .ep(
            "_and_c_rel",
            13,
            (5, 8),
            &[(ARG0, "x10"), ("L-INDEX", "x6"), ("R-INDEX", "x14")],
        )
        .property("x10", "NUM", "PL");
    proper_name(builder, "Mary", "x14", [15, 16, 17, 18], (9, 13))
        .ep("_sleep_v_1_rel", 2, (14, 19), &[(ARG0, "e3"), ("ARG1", "x10")])
        .qeq(1, 2)
        .qeq(11, 13)
        .build()
}

/// "John ran quickly."
pub fn manner_modified() -> Mrs {
    let builder = GraphBuilder::new(1).index("e3", &[("SF", "PROP"), ("TENSE", "PAST")]);
    proper_name(builder, "John", "x6", [4, 5, 7, 8], (0, 4))
        .ep("_run_v_1_rel", 2, (5, 8), &[(ARG0, "e3"), ("ARG1", "x6")])
        .ep(
            "_quick_a_1_rel",
            2,
            (9, 16),
            &[(ARG0, "e9"), ("ARG1", "e3")],
        )
        .qeq(1, 2)
        .build()
}

/// "John has three dogs."
pub fn counted_entity() -> Mrs {
    let builder = GraphBuilder::new(1).index("e3", &[("SF", "PROP"), ("TENSE", "PRES")]);
    proper_name(builder, "John", "x6", [4, 5, 7, 8], (0, 4))
        .ep(
            "_have_v_1_rel",
            2,
            (5, 8),
            &[(ARG0, "e3"), ("ARG1", "x6"), ("ARG2", "x9")],
        )
        .ep(
            "UDEF_Q_REL",
            10,
            (9, 19),
            &[(ARG0, "x9"), ("RSTR", "h11"), ("BODY", "h12")],
        )
        .ep(
            "CARD_REL",
            13,
            (9, 14),
            &[(ARG0, "e14"), ("ARG1", "x9"), (CARG, "\"3\"")],
        )
        .ep("_dog_n_1_rel", 13, (15, 19), &[(ARG0, "x9")])
        .property("x9", "NUM", "PL")
        .qeq(1, 2)
        .qeq(11, 13)
        .build()
}
