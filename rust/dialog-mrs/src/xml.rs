//! The MRX exchange format.
//!
//! Graphs arrive from the parser and leave for the generator as
//! DELPH-IN MRX documents:
//!
//! ```text
//! mrs
//!  ├─ label(vid)                  top handle
//!  ├─ var(vid)                    main event
//!  ├─ ep(cfrom, cto)*
//!  │    ├─ pred | spred
//!  │    ├─ label(vid)
//!  │    └─ fvpair*
//!  │         ├─ rargname
//!  │         └─ var(vid, sort) | constant
//!  │              └─ extrapair*(path, value)
//!  └─ hcons(hreln)*
//!       ├─ hi → var
//!       └─ lo → var | label
//! ```
//!
//! The document is deserialized with `quick-xml`'s serde support into the
//! raw `*Xml` structs below and then lowered into an [`Mrs`]. Every field of
//! the raw structs is optional so that missing pieces can be reported per
//! element rather than failing the whole document.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::constraint::Target;
use crate::role::{RoleValue, Value};
use crate::{
    CodecError, Handle, HandleConstraint, MAX_VARIABLE_ID, Mrs, Predicate, Predication, Sort, Span,
    Variable,
};

/// How the reader treats malformed elements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Fail on the first malformed element instead of logging and skipping
    /// it
    pub strict: bool,
}

impl ReadOptions {
    pub fn strict() -> Self {
        ReadOptions { strict: true }
    }

    pub fn lenient() -> Self {
        ReadOptions { strict: false }
    }

    fn malformed(&self, element: &str, reason: impl Into<String>) -> Result<(), CodecError> {
        let reason = reason.into();
        if self.strict {
            return Err(CodecError::Malformed {
                element: element.to_string(),
                reason,
            });
        }
        error!(element, reason = %reason, "skipping malformed element");
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename = "mrs")]
struct MrsXml {
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<LabelXml>,
    #[serde(skip_serializing_if = "Option::is_none")]
    var: Option<VarXml>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    ep: Vec<EpXml>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    hcons: Vec<HconsXml>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LabelXml {
    #[serde(rename = "@vid", skip_serializing_if = "Option::is_none")]
    vid: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct VarXml {
    #[serde(rename = "@vid", skip_serializing_if = "Option::is_none")]
    vid: Option<String>,
    #[serde(rename = "@sort", skip_serializing_if = "Option::is_none")]
    sort: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    extrapair: Vec<ExtrapairXml>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ExtrapairXml {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct EpXml {
    #[serde(rename = "@cfrom", skip_serializing_if = "Option::is_none")]
    cfrom: Option<String>,
    #[serde(rename = "@cto", skip_serializing_if = "Option::is_none")]
    cto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pred: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spred: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<LabelXml>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    fvpair: Vec<FvpairXml>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FvpairXml {
    #[serde(skip_serializing_if = "Option::is_none")]
    rargname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    var: Option<VarXml>,
    #[serde(skip_serializing_if = "Option::is_none")]
    constant: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HconsXml {
    #[serde(rename = "@hreln", skip_serializing_if = "Option::is_none")]
    hreln: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hi: Option<HiXml>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lo: Option<LoXml>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HiXml {
    #[serde(skip_serializing_if = "Option::is_none")]
    var: Option<VarXml>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LoXml {
    #[serde(skip_serializing_if = "Option::is_none")]
    var: Option<VarXml>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<LabelXml>,
}

fn parse_id(vid: Option<&str>) -> Result<u32, String> {
    let vid = vid.ok_or("missing vid")?;
    let id = vid
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid vid {vid:?}: {e}"))?;
    if id > MAX_VARIABLE_ID {
        return Err(format!("vid {id} exceeds {MAX_VARIABLE_ID}"));
    }
    Ok(id)
}

fn parse_offset(offset: Option<&str>) -> Option<usize> {
    offset.and_then(|offset| offset.trim().parse::<usize>().ok())
}

impl VarXml {
    fn lower(&self, default_sort: Option<Sort>) -> Result<Variable, String> {
        let id = parse_id(self.vid.as_deref())?;
        let sort = match (&self.sort, default_sort) {
            (Some(sort), _) => sort.parse::<Sort>().map_err(|e| e.to_string())?,
            (None, Some(sort)) => sort,
            (None, None) => return Err("missing sort".into()),
        };
        let mut variable = Variable::new(sort, id);
        for pair in &self.extrapair {
            match (&pair.path, &pair.value) {
                (Some(path), Some(value)) => variable.set_property(path.trim(), value.trim()),
                _ => return Err("extrapair without path or value".into()),
            }
        }
        Ok(variable)
    }

    fn raise(variable: &Variable) -> Self {
        VarXml {
            vid: Some(variable.id().to_string()),
            sort: Some(variable.sort().to_string()),
            extrapair: variable
                .properties()
                .map(|(path, value)| ExtrapairXml {
                    path: Some(path.to_string()),
                    value: Some(value.to_string()),
                })
                .collect(),
        }
    }

    fn handle(handle: Handle) -> Self {
        VarXml {
            vid: Some(handle.0.to_string()),
            sort: Some(Sort::Handle.to_string()),
            extrapair: Vec::new(),
        }
    }
}

/// Read a document with the default (lenient) options
pub fn read(xml: &str) -> Result<Mrs, CodecError> {
    read_with(xml, &ReadOptions::default())
}

/// Read a document. Unparseable XML is always an error; malformed elements
/// are skipped or rejected depending on `options`.
pub fn read_with(xml: &str, options: &ReadOptions) -> Result<Mrs, CodecError> {
    let document: MrsXml =
        quick_xml::de::from_str(xml).map_err(|e| CodecError::Syntax(format!("{e}")))?;

    let top = match document
        .label
        .as_ref()
        .map(|label| parse_id(label.vid.as_deref()))
    {
        Some(Ok(id)) => Handle(id),
        Some(Err(reason)) => {
            options.malformed("label", reason)?;
            Handle(0)
        }
        None => {
            options.malformed("label", "missing top handle")?;
            Handle(0)
        }
    };
    let mut mrs = Mrs::new(top);

    match document.var.as_ref().map(|var| var.lower(Some(Sort::Event))) {
        Some(Ok(index)) => {
            let index = mrs.push_variable(index);
            mrs.set_index(index);
        }
        Some(Err(reason)) => options.malformed("var", reason)?,
        None => options.malformed("var", "missing index")?,
    }

    for ep in &document.ep {
        match lower_predication(&mut mrs, ep, options)? {
            Some(predication) => {
                mrs.add_predication(predication);
            }
            None => continue,
        }
    }

    for hcons in &document.hcons {
        match lower_constraint(hcons) {
            Ok(constraint) => mrs.add_constraint(constraint),
            Err(reason) => options.malformed("hcons", reason)?,
        }
    }

    mrs.unify_coreferences();
    debug!(
        predications = mrs.len(),
        constraints = mrs.constraints().len(),
        "read graph"
    );
    Ok(mrs)
}

fn lower_predication(
    mrs: &mut Mrs,
    ep: &EpXml,
    options: &ReadOptions,
) -> Result<Option<Predication>, CodecError> {
    let predicate = match (&ep.pred, &ep.spred) {
        (Some(name), None) | (None, Some(name)) => Predicate::parse(name.as_str()),
        (Some(_), Some(_)) => {
            options.malformed("ep", "both pred and spred")?;
            return Ok(None);
        }
        (None, None) => {
            options.malformed("ep", "missing pred")?;
            return Ok(None);
        }
    };
    let label = match ep.label.as_ref().map(|label| parse_id(label.vid.as_deref())) {
        Some(Ok(id)) => Handle(id),
        Some(Err(reason)) => {
            options.malformed("ep", format!("{predicate}: {reason}"))?;
            return Ok(None);
        }
        None => {
            options.malformed("ep", format!("{predicate}: missing label"))?;
            return Ok(None);
        }
    };

    let mut predication = Predication::new(predicate, label);
    if let (Some(start), Some(end)) = (
        parse_offset(ep.cfrom.as_deref()),
        parse_offset(ep.cto.as_deref()),
    ) {
        predication.span = Some(Span::new(start, end));
    }

    for pair in &ep.fvpair {
        let Some(role) = pair.rargname.as_deref().map(str::trim) else {
            options.malformed("fvpair", format!("{}: missing rargname", predication.predicate))?;
            continue;
        };
        let value = match (&pair.var, &pair.constant) {
            (Some(var), _) => match var.lower(None) {
                Ok(variable) => Value::Variable(mrs.push_variable(variable)),
                Err(reason) => {
                    options.malformed("fvpair", format!("{role}: {reason}"))?;
                    continue;
                }
            },
            (None, Some(constant)) => Value::Constant(constant.trim().trim_matches('"').into()),
            (None, None) => {
                options.malformed("fvpair", format!("{role}: missing value"))?;
                continue;
            }
        };
        predication.roles.push(RoleValue {
            role: role.to_string(),
            value,
        });
    }
    Ok(Some(predication))
}

fn lower_constraint(hcons: &HconsXml) -> Result<HandleConstraint, String> {
    let relation = hcons.hreln.clone().ok_or("missing hreln")?;
    let hi = hcons
        .hi
        .as_ref()
        .and_then(|hi| hi.var.as_ref())
        .ok_or("missing hi")?;
    let hi = Handle(parse_id(hi.vid.as_deref())?);
    let lo = hcons.lo.as_ref().ok_or("missing lo")?;
    let lo = match (&lo.var, &lo.label) {
        (Some(var), _) => Target::Handle(Handle(parse_id(var.vid.as_deref())?)),
        (None, Some(label)) => Target::Label(Handle(parse_id(label.vid.as_deref())?)),
        (None, None) => return Err("empty lo".into()),
    };
    Ok(HandleConstraint { relation, hi, lo })
}

/// Write a graph as an MRX document
pub fn write(mrs: &Mrs) -> Result<String, CodecError> {
    let document = MrsXml {
        label: Some(LabelXml {
            vid: Some(mrs.top().0.to_string()),
        }),
        var: mrs.index_variable().map(VarXml::raise),
        ep: mrs
            .predications()
            .iter()
            .map(|predication| raise_predication(mrs, predication))
            .collect(),
        hcons: mrs
            .constraints()
            .iter()
            .map(|constraint| HconsXml {
                hreln: Some(constraint.relation.clone()),
                hi: Some(HiXml {
                    var: Some(VarXml::handle(constraint.hi)),
                }),
                lo: Some(match constraint.lo {
                    Target::Handle(handle) => LoXml {
                        var: Some(VarXml::handle(handle)),
                        label: None,
                    },
                    Target::Label(handle) => LoXml {
                        var: None,
                        label: Some(LabelXml {
                            vid: Some(handle.0.to_string()),
                        }),
                    },
                }),
            })
            .collect(),
    };
    quick_xml::se::to_string(&document).map_err(|e| CodecError::Write(format!("{e}")))
}

fn raise_predication(mrs: &Mrs, predication: &Predication) -> EpXml {
    let (cfrom, cto) = match predication.span {
        Some(span) => (span.start.to_string(), span.end.to_string()),
        None => ("-1".to_string(), "-1".to_string()),
    };
    let (pred, spred) = match &predication.predicate {
        Predicate::Grammar(name) => (Some(name.clone()), None),
        Predicate::Lexical(name) => (None, Some(name.clone())),
    };
    EpXml {
        cfrom: Some(cfrom),
        cto: Some(cto),
        pred,
        spred,
        label: Some(LabelXml {
            vid: Some(predication.label.0.to_string()),
        }),
        fvpair: predication
            .roles
            .iter()
            .map(|pair| match &pair.value {
                Value::Variable(variable) => FvpairXml {
                    rargname: Some(pair.role.clone()),
                    var: Some(VarXml::raise(mrs.variable(*variable))),
                    constant: None,
                },
                Value::Constant(constant) => FvpairXml {
                    rargname: Some(pair.role.clone()),
                    var: None,
                    constant: Some(constant.clone()),
                },
            })
            .collect(),
    }
}
