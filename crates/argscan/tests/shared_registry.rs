use std::sync::Arc;
use std::thread;

use argscan::{ParseError, Registry};

fn registry() -> Registry {
    let mut reg = Registry::new("shared", "");
    reg.add_flag("verbose", "", Some('v')).unwrap();
    reg.add_option("jobs", "", Some('j'), "1", ["1", "2", "4", "8"])
        .unwrap();
    reg.add_command("build", "").unwrap();
    reg
}

#[test]
fn one_registry_serves_concurrent_parses() {
    let reg = Arc::new(registry());
    let handles: Vec<_> = ["1", "2", "4", "8"]
        .into_iter()
        .map(|jobs| {
            let reg = Arc::clone(&reg);
            thread::spawn(move || {
                let result = reg.parse(["build", "-v", "-j", jobs]).unwrap();
                (jobs, result)
            })
        })
        .collect();

    for handle in handles {
        let (jobs, result) = handle.join().unwrap();
        assert_eq!(result.command(), Some("build"));
        assert!(result.flag("verbose"));
        assert_eq!(result.option("jobs"), Some(jobs));
    }
}

#[test]
fn results_are_independent_of_each_other() {
    let reg = registry();
    let first = reg.parse(["-v"]).unwrap();
    let second = reg.parse(["--jobs", "4"]).unwrap();
    assert!(first.flag("verbose"));
    assert_eq!(first.option("jobs"), Some("1"));
    assert!(!second.flag("verbose"));
    assert_eq!(second.option("jobs"), Some("4"));
}

#[test]
fn errors_carry_the_offending_token() {
    let reg = registry();
    let err = reg.parse(["build", "-vx"]).unwrap_err();
    assert_eq!(err.token(), Some("-vx"));
    assert!(matches!(err, ParseError::InvalidArgument { abbreviation: 'x', .. }));
}
