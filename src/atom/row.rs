//! The row atom: an ordered sequence of atoms joined with TeX inter-atom
//! glue.

use crate::atom::{Atom, AtomType};
use crate::boxes::{builders, BoxNode};
use crate::env::Env;
use crate::glue;

/// An ordered sequence of atoms laid out left to right.
#[derive(Debug, Clone)]
pub struct RowAtom {
    children: Vec<Atom>,
}

impl RowAtom {
    pub fn new(children: Vec<Atom>) -> RowAtom {
        RowAtom { children }
    }

    pub fn add(&mut self, atom: Atom) {
        self.children.push(atom);
    }

    pub fn children(&self) -> &[Atom] {
        &self.children
    }

    pub fn left_type(&self) -> AtomType {
        self.children
            .first()
            .map(Atom::left_type)
            .unwrap_or(AtomType::Ordinary)
    }

    pub fn right_type(&self) -> AtomType {
        self.children
            .last()
            .map(Atom::right_type)
            .unwrap_or(AtomType::Ordinary)
    }

    /// The sole child, if the row wraps exactly one atom.
    pub fn single_atom(&self) -> Option<&Atom> {
        if self.children.len() == 1 {
            Some(&self.children[0])
        } else {
            None
        }
    }

    pub fn create_box(&self, env: &mut Env) -> BoxNode {
        let mut hbox = builders::HBox::new();
        let mut prev: Option<AtomType> = None;

        for (idx, child) in self.children.iter().enumerate() {
            let current = match child.row_type() {
                Some(current) => current,
                // spacing-transparent atoms contribute their box and reset
                // the spacing context, so a binary operator right after one
                // is demoted like at the start of a row
                None => {
                    hbox.add_node(child.create_box(env));
                    prev = None;
                    continue;
                }
            };

            let next = self.children[idx + 1..]
                .iter()
                .find_map(Atom::row_type);
            let current = demote_binary(current, prev, next);

            if let Some(prev) = prev {
                let space = glue::between(prev, current, env);
                if space.width != 0.0 {
                    hbox.add_node(space);
                }
            }
            hbox.add_node(child.create_box(env));
            let right = child.right_type();
            prev = Some(if right == AtomType::BinaryOperator {
                // a demoted binary stays ordinary for the next pair too
                current
            } else {
                right
            });
        }

        hbox.build()
    }
}

/// TeX's demotion rule: a binary operator with nothing to operate on is
/// spaced as an ordinary atom.
fn demote_binary(current: AtomType, prev: Option<AtomType>, next: Option<AtomType>) -> AtomType {
    use AtomType::*;
    if current != BinaryOperator {
        return current;
    }
    match prev {
        None | Some(BinaryOperator) | Some(Relation) | Some(Opening) | Some(Punctuation)
        | Some(BigOperator) => return Ordinary,
        _ => {}
    }
    match next {
        Some(Relation) | Some(Closing) | Some(Punctuation) => Ordinary,
        _ => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_binary_is_ordinary() {
        use AtomType::*;
        assert_eq!(demote_binary(BinaryOperator, None, None), Ordinary);
        assert_eq!(demote_binary(BinaryOperator, Some(Relation), Some(Ordinary)), Ordinary);
        assert_eq!(demote_binary(BinaryOperator, Some(Ordinary), Some(Closing)), Ordinary);
        assert_eq!(
            demote_binary(BinaryOperator, Some(Ordinary), Some(Ordinary)),
            BinaryOperator
        );
        assert_eq!(demote_binary(Relation, None, None), Relation);
    }
}
