use std::{error::Error, fmt};

use logify::{Severity, logger_config, parse_line};

#[derive(Debug)]
struct PaymentError {
    source: std::io::Error,
}

impl fmt::Display for PaymentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "payment gateway rejected the request")
    }
}

impl Error for PaymentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

fn main() {
    let logger = logger_config()
        .with_level(Severity::Debug)
        .with_stdout(true)
        .save_to_file(true)
        .with_file_name("/tmp/logify_example.log")
        .with_crash_reporter(|error: &(dyn Error + 'static)| {
            println!("crash reporter received: {error}");
        })
        .with_bug_report(|message: &str, _: Option<&(dyn Error + 'static)>| {
            println!("bug report filed: {message}");
        })
        .with_terminator(|code: i32| println!("fatal record, exit status would be {code}"))
        .build()
        .expect("Unable to build logger");

    logger.subscribe(|payload| {
        if let Some(line) = parse_line(payload) {
            println!("subscriber saw {} record: {}", line.severity, line.message);
        }
    });

    logger.debug("starting checkout").unwrap();
    logger.info("cart contains 3 items").unwrap();
    let error = PaymentError {
        source: std::io::Error::other("connection reset by peer"),
    };
    logger.error("checkout failed", Some(&error)).unwrap();
    logger.fatal("no payment backend left", Some(&error)).unwrap();
    logger.close().unwrap();

    let content = std::fs::read_to_string("/tmp/logify_example.log").unwrap();
    println!("\n--- /tmp/logify_example.log ---\n{}", content.trim());
}
