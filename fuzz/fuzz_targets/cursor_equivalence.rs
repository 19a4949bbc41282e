#![no_main]

use libfuzzer_sys::fuzz_target;
use ranked_avl::model::CursorEquivalenceInput;

fuzz_target!(|input: CursorEquivalenceInput| {
    ranked_avl::model::run_cursor_equivalence(input.values, input.ops);
});
