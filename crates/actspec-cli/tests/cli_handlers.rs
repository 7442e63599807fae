//! Integration tests for the `describe` and `check` handlers, driven with
//! in-memory input and output against manifests written to a temp dir.

use std::io::Cursor;
use std::path::PathBuf;

use actspec_cli::check::{self, CheckArgs, CheckSummary};
use actspec_cli::describe::{self, DescribeArgs};

const MANIFEST: &str = r#"
namespace: cart
actions:
  - type: ADD_ITEM
    doc: Put an item in the cart
    args:
      - id: sku
        type: string
      - id: qty
        doc: Number of units
        type: integer
  - type: SET_COUPON
    payload: string?
  - type: CHECKOUT
"#;

fn write_manifest(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write manifest");
    path
}

fn check_args(manifest: PathBuf, check_payloads: bool) -> CheckArgs {
    CheckArgs {
        manifest,
        actions: None,
        check_payloads,
        ignore: Vec::new(),
    }
}

fn run_check(args: &CheckArgs, input: &str) -> (CheckSummary, String) {
    let mut out = Vec::new();
    let summary = check::run(args, Cursor::new(input.to_string()), &mut out).expect("check runs");
    (summary, String::from_utf8(out).expect("utf8 output"))
}

const STREAM: &str = r#"{"type": "cart_ADD_ITEM", "payload": {"sku": "A-1", "qty": 2}}
{"type": "cart_ADD_ITEM", "payload": {"sku": "A-1", "qty": "two"}}

{"type": "cart_CHECKOUT"}
{"type": "EFFECT_RESOLVED"}
{"type": "cart_REFUND", "payload": 3}
"#;

#[test]
fn test_check_without_payload_checks() {
    let dir = tempfile::tempdir().unwrap();
    let args = check_args(write_manifest(&dir, "cart.yaml", MANIFEST), false);
    let (summary, output) = run_check(&args, STREAM);

    assert_eq!(
        summary,
        CheckSummary {
            total: 5,
            accepted: 3,
            ignored: 1,
            rejected: 0,
            unknown: 1,
        }
    );
    assert!(!summary.is_clean());
    assert!(output.contains("line 6: Unknown cart_REFUND"), "{output}");
    assert!(output.contains("5 actions: 3 accepted, 1 ignored, 0 rejected, 1 unknown"));
}

#[test]
fn test_check_with_payload_checks() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = check_args(write_manifest(&dir, "cart.yaml", MANIFEST), true);
    args.ignore.push("cart_REFUND".to_string());
    let (summary, output) = run_check(&args, STREAM);

    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.unknown, 0);
    assert_eq!(summary.ignored, 2);
    assert!(output.contains("line 2: Rejected cart_ADD_ITEM"), "{output}");
}

#[test]
fn test_check_clean_stream() {
    let dir = tempfile::tempdir().unwrap();
    let args = check_args(write_manifest(&dir, "cart.yaml", MANIFEST), true);
    let (summary, _) = run_check(
        &args,
        "{\"type\": \"cart_SET_COUPON\"}\n{\"type\": \"cart_SET_COUPON\", \"payload\": \"SAVE10\"}\n",
    );
    assert!(summary.is_clean());
    assert_eq!(summary.accepted, 2);
}

#[test]
fn test_check_rejects_invalid_json_line() {
    let dir = tempfile::tempdir().unwrap();
    let args = check_args(write_manifest(&dir, "cart.yaml", MANIFEST), false);
    let mut out = Vec::new();
    let err = check::run(&args, Cursor::new("{not json}\n"), &mut out).unwrap_err();
    assert!(err.to_string().contains("line 1"), "{err}");
}

#[test]
fn test_describe_lists_actions_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let args = DescribeArgs {
        manifest: write_manifest(&dir, "cart.yaml", MANIFEST),
    };
    let mut out = Vec::new();
    describe::run(&args, &mut out).unwrap();
    let output = String::from_utf8(out).unwrap();

    let expected = "\
namespace: cart
ADD_ITEM (cart_ADD_ITEM)
    Put an item in the cart
    - sku
    - qty: Number of units
SET_COUPON (cart_SET_COUPON)
    payload: whole value
CHECKOUT (cart_CHECKOUT)
    payload: none
";
    assert_eq!(output, expected);
}

#[test]
fn test_describe_json_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let args = DescribeArgs {
        manifest: write_manifest(&dir, "ping.json", r#"{"actions": [{"type": "PING"}]}"#),
    };
    let mut out = Vec::new();
    describe::run(&args, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "PING (PING)\n    payload: none\n");
}

#[test]
fn test_describe_missing_manifest() {
    let args = DescribeArgs {
        manifest: PathBuf::from("/nonexistent/cart.yaml"),
    };
    let err = describe::run(&args, &mut Vec::<u8>::new()).unwrap_err();
    assert!(err.to_string().contains("loading"), "{err}");
}
