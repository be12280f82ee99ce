//! Gathers every `mm::vm` submodule's self-tests into the `run() ->
//! Vec<TestCase>` shape `sys::test` already uses, so one top-level suite
//! (called from `core::boot::entry`) can run the whole VM core.

#![cfg(feature = "self_test")]

use crate::klib::test_framework::{run_test_suite, TestCase};
use alloc::vec;
use alloc::vec::Vec;

pub mod swap_test {
    use super::*;
    use crate::mm::vm::swap::self_test::*;

    pub fn run() -> Vec<TestCase> {
        vec![
            TestCase::new("round_trips_a_page", round_trips_a_page),
            TestCase::new("freed_slot_is_reused", freed_slot_is_reused),
            TestCase::new("swap_full_reports_error", swap_full_reports_error),
        ]
    }
}

pub mod frame_test {
    use super::*;
    use crate::mm::vm::frame::self_test::*;

    pub fn run() -> Vec<TestCase> {
        vec![
            TestCase::new("allocate_and_free_round_trips", allocate_and_free_round_trips),
            TestCase::new("eviction_frees_a_slot_and_marks_swapped", eviction_frees_a_slot_and_marks_swapped),
            TestCase::new("pinned_page_is_not_evicted", pinned_page_is_not_evicted),
        ]
    }
}

pub mod spt_test {
    use super::*;
    use crate::mm::vm::spt::self_test::*;

    pub fn run() -> Vec<TestCase> {
        vec![
            TestCase::new("insert_then_lookup_round_trips", insert_then_lookup_round_trips),
            TestCase::new("lookup_rounds_down_to_page_boundary", lookup_rounds_down_to_page_boundary),
            TestCase::new("insert_replaces_existing_entry_at_same_page", insert_replaces_existing_entry_at_same_page),
            TestCase::new("remove_drops_the_entry", remove_drops_the_entry),
            TestCase::new("drain_empties_the_table_and_returns_everything", drain_empties_the_table_and_returns_everything),
        ]
    }
}

pub mod fault_test {
    use super::*;
    use crate::mm::vm::fault::self_test::*;

    pub fn run() -> Vec<TestCase> {
        vec![
            TestCase::new("stack_grows_one_page_below_phys_base", stack_grows_one_page_below_phys_base),
            TestCase::new("fault_below_esp_minus_pusha_is_rejected", fault_below_esp_minus_pusha_is_rejected),
            TestCase::new("fault_within_pusha_slack_grows_stack", fault_within_pusha_slack_grows_stack),
            TestCase::new("address_zero_is_never_a_stack_access", address_zero_is_never_a_stack_access),
            TestCase::new("stack_limit_boundary_is_rejected_just_past_it", stack_limit_boundary_is_rejected_just_past_it),
            TestCase::new("repeated_fault_on_resident_page_is_idempotent", repeated_fault_on_resident_page_is_idempotent),
            TestCase::new("file_backed_fault_reads_exact_bytes", file_backed_fault_reads_exact_bytes),
            TestCase::new("validate_user_buffer_accepts_an_already_mapped_page", validate_user_buffer_accepts_an_already_mapped_page),
            TestCase::new("validate_user_buffer_grows_stack_for_a_write_destination", validate_user_buffer_grows_stack_for_a_write_destination),
            TestCase::new("validate_user_buffer_rejects_missing_page_for_a_read_source", validate_user_buffer_rejects_missing_page_for_a_read_source),
            TestCase::new("validate_user_buffer_rejects_page_zero", validate_user_buffer_rejects_page_zero),
            TestCase::new("validate_user_buffer_rejects_kernel_address_space", validate_user_buffer_rejects_kernel_address_space),
            TestCase::new("validate_user_buffer_spans_multiple_pages", validate_user_buffer_spans_multiple_pages),
        ]
    }
}

pub mod loader_test {
    use super::*;
    use crate::mm::vm::loader::self_test::*;

    pub fn run() -> Vec<TestCase> {
        vec![
            TestCase::new("three_page_segment_gets_exact_read_zero_split", three_page_segment_gets_exact_read_zero_split),
            TestCase::new("argv_strings_land_intact_on_the_stack", argv_strings_land_intact_on_the_stack),
            TestCase::new("oversized_phnum_is_rejected", oversized_phnum_is_rejected),
            TestCase::new("tokenizer_drops_repeated_spaces", tokenizer_drops_repeated_spaces),
        ]
    }
}

/// Runs every VM submodule's suite in turn. Called once from
/// `core::boot::entry::kernel_main` under the `self_test` feature.
pub fn run_all() {
    run_test_suite("vm::swap", &swap_test::run());
    run_test_suite("vm::frame", &frame_test::run());
    run_test_suite("vm::spt", &spt_test::run());
    run_test_suite("vm::fault", &fault_test::run());
    run_test_suite("vm::loader", &loader_test::run());
}
