//! Property-based tests for the shard merge policy.
//!
//! These tests use proptest to generate random fragments and verify that
//! the merge laws hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::platform::Platform;
    use crate::shard::Shard;
    use crate::stage::Stage;
    use proptest::prelude::*;

    fn arb_commands() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[A-Z_]{1,8}=[a-z0-9.]{0,6}", 0..4)
    }

    fn arb_stage() -> impl Strategy<Value = Option<Stage>> {
        prop::option::of(prop::sample::select(Stage::ALL.to_vec()))
    }

    fn arb_platform() -> impl Strategy<Value = Option<Platform>> {
        prop::option::of(prop::sample::select(vec![Platform::Linux, Platform::Osx]))
    }

    prop_compose! {
        fn arb_fragment()(
            env in arb_commands(),
            script in arb_commands(),
            before_install in arb_commands(),
            name in prop::option::of("[a-z ]{1,12}"),
            condition in prop::option::of("[a-z =]{1,12}"),
            stage in arb_stage(),
            os in arb_platform(),
        ) -> Shard {
            Shard {
                env,
                script,
                before_install,
                name,
                condition,
                stage,
                os,
                ..Shard::default()
            }
        }
    }

    proptest! {
        /// Property: merging is associative
        #[test]
        fn merge_is_associative(a in arb_fragment(), b in arb_fragment(), c in arb_fragment()) {
            let left = a.clone().merge(b.clone()).merge(c.clone());
            let right = a.merge(b.merge(c));
            prop_assert_eq!(left, right);
        }

        /// Property: list fields are the literal concatenation of the fragments
        #[test]
        fn merge_concatenates_lists(a in arb_fragment(), b in arb_fragment(), c in arb_fragment()) {
            let expected_env: Vec<String> = a.env.iter()
                .chain(b.env.iter())
                .chain(c.env.iter())
                .cloned()
                .collect();
            let expected_script: Vec<String> = a.script.iter()
                .chain(b.script.iter())
                .chain(c.script.iter())
                .cloned()
                .collect();

            let merged = a.merge(b).merge(c);
            prop_assert_eq!(merged.env, expected_env);
            prop_assert_eq!(merged.script, expected_script);
        }

        /// Property: the rightmost fragment that sets a scalar wins
        #[test]
        fn merge_scalar_last_set_wins(a in arb_fragment(), b in arb_fragment()) {
            let expected = b.name.clone().or_else(|| a.name.clone());
            let merged = a.merge(b);
            prop_assert_eq!(merged.name, expected);
        }
    }
}
