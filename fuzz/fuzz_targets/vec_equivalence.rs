#![no_main]
use libfuzzer_sys::fuzz_target;

use ranked_avl::model::{run_vec_equivalence, Op};

fuzz_target!(|ops: Vec<Op>| { run_vec_equivalence(ops) });
