use std::io::{self, Read, Write};

use tidemark::{ByteSink, Parser};

fn main() {
    let raw_html = std::env::args().any(|arg| arg == "--html");

    let mut stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut parser = Parser::new(raw_html);
    let mut sink = ByteSink::with_capacity(64 * 1024);
    let mut buf = [0u8; 64 * 1024];

    loop {
        let n = stdin.read(&mut buf).expect("read stdin");
        if n == 0 {
            break;
        }
        parser.feed(&buf[..n], &mut sink);
        if !sink.is_empty() {
            stdout.write_all(sink.as_bytes()).expect("write stdout");
            sink.clear();
        }
    }

    parser.finish(&mut sink);
    stdout.write_all(sink.as_bytes()).expect("write stdout");
    stdout.flush().expect("flush stdout");
}
