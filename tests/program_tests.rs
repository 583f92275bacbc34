use reckon::Brain;

fn build_x_times_two(brain: &mut Brain) {
    brain.apply_operation("x", false, false);
    brain.apply_operation("×", false, false);
    brain.set_operand(2.0);
    brain.apply_operation("=", false, false);
}

#[test]
fn restore_recomputes_against_current_registers() {
    let mut brain = Brain::new();
    brain.set_variable("x", 3.0);
    build_x_times_two(&mut brain);
    assert_eq!(brain.current_result(), 6.0);

    brain.save_program();
    assert!(brain.has_saved_program());

    brain.set_variable("x", 5.0);
    assert_eq!(brain.restore_program(), Some(10.0));
    assert_eq!(brain.current_result(), 10.0);
}

#[test]
fn restore_without_save_returns_none() {
    let mut brain = Brain::new();
    assert!(!brain.has_saved_program());
    assert_eq!(brain.restore_program(), None);
}

#[test]
fn save_without_tree_keeps_slot_empty() {
    let mut brain = Brain::new();
    brain.set_operand(5.0);
    brain.save_program();
    assert!(!brain.has_saved_program());
}

#[test]
fn clear_program_leaves_live_tree_alone() {
    let mut brain = Brain::new();
    build_x_times_two(&mut brain);
    brain.save_program();

    brain.clear_program();
    assert!(!brain.has_saved_program());
    assert_eq!(brain.rendered_expression(), "x×2");
}

#[test]
fn plot_closure_rereads_registers_every_call() {
    let mut brain = Brain::new();
    build_x_times_two(&mut brain);
    brain.save_program();

    let f = brain.plot_closure().expect("program was saved");
    brain.set_variable("x", 3.0);
    assert_eq!(f(), Some(6.0));

    // Same closure, new register contents, no rebuild.
    brain.set_variable("x", 5.0);
    assert_eq!(f(), Some(10.0));
}

#[test]
fn plot_closure_sees_memory_cell() {
    let mut brain = Brain::new();
    brain.apply_operation("MR", false, false);
    brain.apply_operation("=", false, false);
    brain.save_program();

    let f = brain.plot_closure().expect("program was saved");
    assert_eq!(f(), Some(0.0));

    brain.set_operand(7.0);
    brain.apply_operation("M+", false, false);
    assert_eq!(f(), Some(7.0));
}

#[test]
fn plot_variables_come_in_first_appearance_order() {
    let mut brain = Brain::new();
    brain.apply_operation("x", false, false);
    brain.apply_operation("×", false, false);
    brain.apply_operation("y", false, false);
    brain.apply_operation("=", false, false);
    brain.save_program();
    assert_eq!(brain.plot_variables(), vec!["x", "y"]);
}

#[test]
fn plot_variables_are_deduplicated() {
    let mut brain = Brain::new();
    brain.apply_operation("x", false, false);
    brain.apply_operation("+", false, false);
    brain.apply_operation("x", false, false);
    brain.apply_operation("=", false, false);
    brain.save_program();
    assert_eq!(brain.plot_variables(), vec!["x"]);
}

#[test]
fn random_symbol_keeps_its_drawn_value() {
    let mut brain = Brain::new();
    brain.apply_operation("Rnd", false, false);
    brain.apply_operation("=", false, false);
    let drawn = brain.current_result();
    assert!((0.0..1.0).contains(&drawn));
    assert_eq!(brain.rendered_expression(), "Rnd");

    brain.save_program();
    assert_eq!(brain.restore_program(), Some(drawn));
    assert_eq!(brain.restore_program(), Some(drawn));
}
