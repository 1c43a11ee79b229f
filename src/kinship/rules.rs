//! Built-in kinship rule table.
//!
//! Terms answer "what is the start person to the end person". Rows are
//! checked top to bottom and the first match wins, so gated rows precede
//! the ungated fallback for the same step pattern.

use crate::kinship::{Gate, KinshipRule, NodeRef, Step};
use crate::model::{Gender, RelationKind};

const F: Step = Step::Is(RelationKind::Father);
const M: Step = Step::Is(RelationKind::Mother);
const H: Step = Step::Is(RelationKind::Husband);
const W: Step = Step::Is(RelationKind::Wife);
const CF: Step = Step::Is(RelationKind::ChildOfFather);
const CM: Step = Step::Is(RelationKind::ChildOfMother);
const P: Step = Step::Parent;
const C: Step = Step::Child;
const S: Step = Step::Spouse;

const MALE: &[Gate] = &[Gate::new(NodeRef::Start, Gender::Male)];
const FEMALE: &[Gate] = &[Gate::new(NodeRef::Start, Gender::Female)];
const ANY: &[Gate] = &[];
const PARENT_MALE: &[Gate] = &[Gate::new(NodeRef::At(1), Gender::Male)];
const PARENT_FEMALE: &[Gate] = &[Gate::new(NodeRef::At(1), Gender::Female)];

const fn rule(steps: &'static [Step], gates: &'static [Gate], term: &'static str) -> KinshipRule {
    KinshipRule { steps, gates, term }
}

pub static BUILTIN_RULES: &[KinshipRule] = &[
    // One hop
    rule(&[F], ANY, "father"),
    rule(&[M], ANY, "mother"),
    rule(&[H], ANY, "husband"),
    rule(&[W], ANY, "wife"),
    rule(&[C], MALE, "son"),
    rule(&[C], FEMALE, "daughter"),
    rule(&[C], ANY, "child"),
    // Grandparents, sided by the parent adjacent to the end person
    rule(&[F, F], ANY, "paternal grandfather"),
    rule(&[F, M], ANY, "maternal grandfather"),
    rule(&[M, F], ANY, "paternal grandmother"),
    rule(&[M, M], ANY, "maternal grandmother"),
    // Grandchildren, sided by the start person's own parent
    rule(&[CF, C], MALE, "paternal grandson"),
    rule(&[CF, C], FEMALE, "paternal granddaughter"),
    rule(&[CF, C], ANY, "paternal grandchild"),
    rule(&[CM, C], MALE, "maternal grandson"),
    rule(&[CM, C], FEMALE, "maternal granddaughter"),
    rule(&[CM, C], ANY, "maternal grandchild"),
    // Siblings
    rule(&[C, F], ANY, "sibling (shared father)"),
    rule(&[C, M], ANY, "sibling (shared mother)"),
    rule(&[P, C], ANY, "co-parent"),
    // Step and in-law relations
    rule(&[H, P], ANY, "stepfather"),
    rule(&[W, P], ANY, "stepmother"),
    rule(&[C, S], MALE, "stepson"),
    rule(&[C, S], FEMALE, "stepdaughter"),
    rule(&[C, S], ANY, "stepchild"),
    rule(&[H, C], ANY, "son-in-law"),
    rule(&[W, C], ANY, "daughter-in-law"),
    rule(&[F, S], ANY, "father-in-law"),
    rule(&[M, S], ANY, "mother-in-law"),
    // Three hops
    rule(&[F, P, F], ANY, "paternal great-grandfather"),
    rule(&[F, P, M], ANY, "maternal great-grandfather"),
    rule(&[M, P, F], ANY, "paternal great-grandmother"),
    rule(&[M, P, M], ANY, "maternal great-grandmother"),
    rule(&[C, C, C], MALE, "great-grandson"),
    rule(&[C, C, C], FEMALE, "great-granddaughter"),
    rule(&[C, C, C], ANY, "great-grandchild"),
    rule(&[C, P, F], MALE, "paternal-side uncle"),
    rule(&[C, P, F], FEMALE, "paternal-side aunt"),
    rule(&[C, P, F], ANY, "paternal-side aunt or uncle"),
    rule(&[C, P, M], MALE, "maternal-side uncle"),
    rule(&[C, P, M], FEMALE, "maternal-side aunt"),
    rule(&[C, P, M], ANY, "maternal-side aunt or uncle"),
    rule(&[C, C, P], MALE, "nephew"),
    rule(&[C, C, P], FEMALE, "niece"),
    rule(&[C, C, P], ANY, "niece or nephew"),
    rule(&[H, C, P], ANY, "brother-in-law"),
    rule(&[W, C, P], ANY, "sister-in-law"),
    rule(&[C, P, S], MALE, "brother-in-law"),
    rule(&[C, P, S], FEMALE, "sister-in-law"),
    rule(&[C, P, S], ANY, "sibling-in-law"),
    rule(&[H, P, P], ANY, "step-grandfather"),
    rule(&[W, P, P], ANY, "step-grandmother"),
    // Four hops
    rule(&[C, C, P, P], PARENT_MALE, "first cousin on father's side"),
    rule(&[C, C, P, P], PARENT_FEMALE, "first cousin on mother's side"),
    rule(&[C, C, P, P], ANY, "first cousin"),
    rule(&[C, P, P, P], MALE, "great-uncle"),
    rule(&[C, P, P, P], FEMALE, "great-aunt"),
    rule(&[C, P, P, P], ANY, "great-aunt or great-uncle"),
    rule(&[C, C, C, P], MALE, "grandnephew"),
    rule(&[C, C, C, P], FEMALE, "grandniece"),
    rule(&[C, C, C, P], ANY, "grandniece or grandnephew"),
    rule(&[H, C, P, P], ANY, "uncle by marriage"),
    rule(&[W, C, P, P], ANY, "aunt by marriage"),
    rule(&[F, P, P, P], ANY, "great-great-grandfather"),
    rule(&[M, P, P, P], ANY, "great-great-grandmother"),
    // Distant cousins
    rule(&[C, C, P, P, P], ANY, "first cousin once removed"),
    rule(&[C, C, C, P, P], ANY, "first cousin once removed"),
    rule(&[C, C, C, P, P, P], ANY, "second cousin"),
];
