use super::HumanOutputter;
use crate::model::{
    ErrorInfo, Event, FatalError, GenericValue, NodeResult, Parameter, PlanValue, Target, Task,
};
use crate::ui::Outputter;
use serde_json::json;
use std::io::Write;

fn render<F>(color_enabled: bool, f: F) -> String
where
    F: FnOnce(&mut HumanOutputter<Vec<u8>>),
{
    let mut outputter = HumanOutputter::new(Vec::<u8>::new(), color_enabled);
    f(&mut outputter);
    String::from_utf8(outputter.into_inner()).expect("utf8")
}

#[test]
fn node_start_event_is_green_when_color_enabled() {
    let event = Event::NodeStart {
        target: Target::new("web1"),
    };
    let plain = render(false, |out| out.print_event(&event).expect("event"));
    let colored = render(true, |out| out.print_event(&event).expect("event"));

    assert_eq!(plain, "Started on web1...\n");
    assert_eq!(colored, "\u{1b}[32mStarted on web1...\u{1b}[0m\n");
}

#[test]
fn node_result_event_renders_the_result() {
    let event = Event::NodeResult {
        result: NodeResult::success("web1").with_message("done"),
    };
    let rendered = render(false, |out| out.print_event(&event).expect("event"));
    assert_eq!(rendered, "Finished on web1:\n  done\n");
}

#[test]
fn successful_result_header_is_green() {
    let result = NodeResult::success("web1");
    let plain = render(false, |out| out.print_result(&result).expect("result"));
    let colored = render(true, |out| out.print_result(&result).expect("result"));

    assert_eq!(plain, "Finished on web1:\n");
    assert_eq!(colored, "\u{1b}[32mFinished on web1:\u{1b}[0m\n");
}

#[test]
fn failed_result_renders_red_header_error_and_plain_message() {
    let result = NodeResult::failure("db", ErrorInfo::new("boom\n").with_kind("task/failed"))
        .with_message("partial output\n");
    let plain = render(false, |out| out.print_result(&result).expect("result"));
    let colored = render(true, |out| out.print_result(&result).expect("result"));

    assert_eq!(plain, "Failed on db:\n  boom\n  partial output\n");
    assert_eq!(
        colored,
        "\u{1b}[31mFailed on db:\u{1b}[0m\n\u{1b}[31m  boom\u{1b}[0m\n  partial output\n"
    );
}

#[test]
fn command_output_skips_blank_streams_and_exit_code() {
    let result = NodeResult::success("web1").with_generic_value(GenericValue::command("out\n", "", 0));
    let rendered = render(false, |out| out.print_result(&result).expect("result"));

    assert_eq!(rendered, "Finished on web1:\n  STDOUT:\n    out\n");
    assert!(!rendered.contains("STDERR:"));
    assert!(!rendered.contains("exit_code"));
}

#[test]
fn command_output_indents_every_stderr_line() {
    let result = NodeResult::success("web1")
        .with_generic_value(GenericValue::command("  \n", "warn 1\nwarn 2", 3));
    let rendered = render(false, |out| out.print_result(&result).expect("result"));

    assert_eq!(rendered, "Finished on web1:\n  STDERR:\n    warn 1\n    warn 2\n");
}

#[test]
fn structured_value_is_pretty_printed_and_indented() {
    let result =
        NodeResult::success("web1").with_generic_value(GenericValue::Structured(json!({"foo": 1})));
    let rendered = render(false, |out| out.print_result(&result).expect("result"));

    assert_eq!(rendered, "Finished on web1:\n  {\n    \"foo\": 1\n  }\n");
}

#[test]
fn message_and_generic_value_are_both_rendered() {
    let result = NodeResult::success("web1")
        .with_message("hello")
        .with_generic_value(GenericValue::Structured(json!([1])));
    let rendered = render(false, |out| out.print_result(&result).expect("result"));

    assert_eq!(rendered, "Finished on web1:\n  hello\n  [\n    1\n  ]\n");
}

#[test]
fn summary_pluralizes_and_rounds_to_two_places() {
    let three = vec![
        NodeResult::success("a"),
        NodeResult::success("b"),
        NodeResult::success("c"),
    ];
    let one = vec![NodeResult::success("a")];

    let rendered = render(false, |out| {
        out.print_summary(&three, 1.004).expect("summary");
        out.print_summary(&one, 0.5).expect("summary");
        out.print_summary(&[], 2.0).expect("summary");
    });

    assert_eq!(
        rendered,
        "Ran on 3 nodes in 1.00 seconds\nRan on 1 node in 0.50 seconds\nRan on 0 nodes in 2.00 seconds\n"
    );
}

#[test]
fn empty_containers_render_compactly() {
    let rendered = render(false, |out| {
        out.print_plan(&PlanValue::from(json!([]))).expect("plan");
        out.print_plan(&PlanValue::from(json!({}))).expect("plan");
    });
    assert_eq!(rendered, "[]\n{}\n");
}

#[test]
fn non_empty_plan_values_are_pretty_printed() {
    let rendered = render(false, |out| {
        out.print_plan(&PlanValue::from(json!({"a": 1}))).expect("plan")
    });
    assert_eq!(rendered, "{\n  \"a\": 1\n}\n");
}

#[test]
fn scalar_plan_values_print_without_quoting() {
    let rendered = render(false, |out| {
        for value in [json!("hello"), json!(42), json!(true), json!(1.5), json!(null)] {
            out.print_plan(&PlanValue::from(value)).expect("plan");
        }
    });
    assert_eq!(rendered, "hello\n42\ntrue\n1.5\n\n");
}

#[test]
fn task_info_lists_usage_and_parameters_in_declared_order() {
    let task = Task::new("package")
        .with_description("Manage packages")
        .with_parameter(
            "action",
            Parameter::new("String").with_description("The operation to perform"),
        )
        .with_parameter("version", Parameter::new("Optional[String]"))
        .with_noop(true);
    let rendered = render(false, |out| out.print_task_info(&task).expect("task info"));

    assert_eq!(
        rendered,
        "\npackage - Manage packages\n\nUSAGE:\ntask run --nodes, -n <node-name> package action=<value> [version=<value>] [--noop]\n\nPARAMETERS:\n- action: String\n    The operation to perform\n- version: Optional[String]\n\n"
    );
}

#[test]
fn task_info_omits_parameters_section_without_parameters() {
    let task = Task::new("ping");
    let rendered = render(false, |out| out.print_task_info(&task).expect("task info"));

    assert_eq!(
        rendered,
        "\nping\n\nUSAGE:\ntask run --nodes, -n <node-name> ping\n\n"
    );
}

#[test]
fn usage_honors_configured_run_command() {
    let outputter = HumanOutputter::new(Vec::<u8>::new(), false).with_run_command("bolt task run");
    let task = Task::new("restart").with_parameter("service", Parameter::new("String"));

    assert_eq!(
        outputter.usage(&task),
        "bolt task run --nodes, -n <node-name> restart service=<value>"
    );
}

#[test]
fn fatal_error_is_red_and_dumps_resultset() {
    let plain = FatalError::new("connection refused");
    let failure = FatalError::run_failure(
        "Plan aborted: run failed on 1 node",
        vec![NodeResult::failure("web1", ErrorInfo::new("exit 1"))],
    );

    let colored = render(true, |out| out.fatal_error(&plain).expect("fatal"));
    assert_eq!(colored, "\u{1b}[31mconnection refused\u{1b}[0m\n");

    let rendered = render(false, |out| out.fatal_error(&failure).expect("fatal"));
    assert!(rendered.starts_with("Plan aborted: run failed on 1 node\n[\n"));
    assert!(rendered.contains("\"host\": \"web1\""));
    assert!(rendered.contains("\"msg\": \"exit 1\""));
    assert!(rendered.ends_with("]\n"));
}

#[test]
fn message_passes_through_and_head_is_silent() {
    let rendered = render(true, |out| {
        out.print_head().expect("head");
        out.print_message("Starting: plan deploy").expect("message");
    });
    assert_eq!(rendered, "Starting: plan deploy\n");
}

#[test]
fn table_rows_render_and_empty_tables_are_skipped() {
    let rendered = render(false, |out| {
        out.print_table(&[]).expect("empty table");
        out.print_table(&[
            vec!["web1".to_owned(), "ok".to_owned()],
            vec!["db".to_owned(), "failed".to_owned()],
        ])
        .expect("table");
    });
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("web1"));
    assert!(lines[1].starts_with("db"));
}

#[derive(Default)]
struct CountingWriter {
    buf: Vec<u8>,
    writes: usize,
    flushes: usize,
}

impl Write for CountingWriter {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.writes += 1;
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

#[test]
fn each_call_is_one_write_followed_by_a_flush() {
    let mut outputter = HumanOutputter::new(CountingWriter::default(), false);
    let result = NodeResult::failure("web1", ErrorInfo::new("bad"))
        .with_message("context")
        .with_generic_value(GenericValue::command("a\n", "b\n", 1));

    outputter.print_result(&result).expect("result");
    outputter.print_summary(&[result], 0.1).expect("summary");

    let writer = outputter.into_inner();
    assert_eq!(writer.writes, 2);
    assert_eq!(writer.flushes, 2);
    assert!(String::from_utf8(writer.buf)
        .expect("utf8")
        .ends_with("Ran on 1 node in 0.10 seconds\n"));
}
