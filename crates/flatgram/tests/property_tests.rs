//! Property-based tests: the packed-table search against a linear-scan
//! reference, and both front-ends against straightforward reference
//! implementations.

use proptest::prelude::*;

use flatgram::{GrammarTable, NONE};
use std::collections::BTreeMap;

// Keys range over terminals 1..=8 and non-terminals 9..=12; production
// symbols avoid the sentinel. BTreeMap iteration order is exactly the
// (terminal, non_terminal) sort the packed format requires.
fn table_strategy() -> impl Strategy<Value = BTreeMap<(u16, u16), Vec<u16>>> {
    prop::collection::btree_map(
        (1u16..=8, 9u16..=12),
        prop::collection::vec(1u16..=12, 0..6),
        0..12,
    )
}

proptest! {
    #[test]
    fn binary_search_matches_linear_scan(entries in table_strategy()) {
        let mut cells = Vec::new();
        for ((terminal, non_terminal), production) in &entries {
            cells.push(*terminal);
            cells.push(*non_terminal);
            cells.extend_from_slice(production);
            cells.push(NONE);
        }
        let table = GrammarTable::new(&cells);
        for terminal in 0..=9u16 {
            for non_terminal in 8..=13u16 {
                let expected = entries
                    .get(&(terminal, non_terminal))
                    .map(Vec::as_slice);
                prop_assert_eq!(table.lookup(terminal, non_terminal), expected);
            }
        }
    }
}

#[cfg(feature = "frontend-calc")]
mod calc_props {
    use super::*;
    use flatgram::calc::Calculator;

    #[derive(Debug, Clone)]
    enum Expr {
        Num(u16),
        Neg(Box<Expr>),
        Add(Box<Expr>, Box<Expr>),
        Sub(Box<Expr>, Box<Expr>),
        Mul(Box<Expr>, Box<Expr>),
    }

    fn expr_strategy() -> impl Strategy<Value = Expr> {
        let leaf = (0u16..1000).prop_map(Expr::Num);
        leaf.prop_recursive(4, 32, 2, |inner| {
            prop_oneof![
                inner.clone().prop_map(|e| Expr::Neg(Box::new(e))),
                (inner.clone(), inner.clone())
                    .prop_map(|(a, b)| Expr::Add(Box::new(a), Box::new(b))),
                (inner.clone(), inner.clone())
                    .prop_map(|(a, b)| Expr::Sub(Box::new(a), Box::new(b))),
                (inner.clone(), inner).prop_map(|(a, b)| Expr::Mul(Box::new(a), Box::new(b))),
            ]
        })
    }

    // Fully parenthesized, so the rendered text encodes the tree shape and
    // the engine folds operands in exactly the reference order.
    fn render(expr: &Expr, out: &mut String) {
        match expr {
            Expr::Num(n) => out.push_str(&n.to_string()),
            Expr::Neg(e) => {
                out.push_str("-(");
                render(e, out);
                out.push(')');
            }
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) => {
                let op = match expr {
                    Expr::Add(..) => '+',
                    Expr::Sub(..) => '-',
                    _ => '*',
                };
                out.push('(');
                render(a, out);
                out.push_str(")");
                out.push(op);
                out.push('(');
                render(b, out);
                out.push(')');
            }
        }
    }

    fn reference(expr: &Expr) -> f64 {
        match expr {
            Expr::Num(n) => f64::from(*n),
            Expr::Neg(e) => -reference(e),
            Expr::Add(a, b) => reference(a) + reference(b),
            Expr::Sub(a, b) => reference(a) - reference(b),
            Expr::Mul(a, b) => reference(a) * reference(b),
        }
    }

    proptest! {
        #[test]
        fn evaluation_matches_reference(expr in expr_strategy()) {
            let mut text = String::new();
            render(&expr, &mut text);
            let got = Calculator::new().eval_line(&text).unwrap();
            prop_assert_eq!(got, reference(&expr));
        }

        #[test]
        fn additive_chains_fold_left(
            first in 0u16..1000,
            rest in prop::collection::vec((prop_oneof![Just('+'), Just('-')], 0u16..1000), 0..8),
        ) {
            let mut text = first.to_string();
            let mut expected = f64::from(first);
            for (op, n) in &rest {
                text.push(*op);
                text.push_str(&n.to_string());
                if *op == '+' {
                    expected += f64::from(*n);
                } else {
                    expected -= f64::from(*n);
                }
            }
            prop_assert_eq!(Calculator::new().eval_line(&text).unwrap(), expected);
        }
    }
}

#[cfg(feature = "frontend-json")]
mod json_props {
    use super::*;
    use flatgram::json::{self, Value};

    // Numbers are quarters of small integers so their decimal rendering is
    // exact; strings stay within the escape-free character set.
    fn value_strategy() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            (-4000i32..4000).prop_map(|n| Value::Number(f64::from(n) / 4.0)),
            "[a-z0-9 ]{0,8}".prop_map(|s| Value::String(s.into())),
        ];
        leaf.prop_recursive(3, 24, 3, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::vec(("[a-z]{1,5}", inner), 0..4).prop_map(|members| {
                    Value::Object(
                        members
                            .into_iter()
                            .map(|(name, value)| (name.into(), value))
                            .collect(),
                    )
                }),
            ]
        })
    }

    proptest! {
        #[test]
        fn serializer_round_trips(value in value_strategy()) {
            let compact = json::from_str(&value.to_string()).unwrap();
            prop_assert_eq!(&compact, &value);
            let pretty = json::from_str(&format!("{value:#}")).unwrap();
            prop_assert_eq!(&pretty, &value);
        }
    }
}
