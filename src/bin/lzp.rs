//! Command line front end for the lzp codec
//!
//! Transcodes stdin to stdout and prints a ratio report to stderr:
//!
//! ```text
//! lzp -c < input > output.lzp      compress
//! lzp -d < output.lzp > input      decompress
//! lzp -m < corpus > model.txt      train a model, dump it as text
//! lzp -C model.txt < input > out   compress with a pre-trained model
//! lzp -D model.txt < out > input   decompress with the same model
//! ```

use lzp::model::dump;
use lzp::{Decoder, Encoder, NullSink, Predictor, ReaderSource, SessionMetrics, WriterSink};
use std::env;
use std::io::{self, BufWriter, Write};
use std::process::exit;

enum Mode {
    Encode,
    Decode,
    Train,
    EncodeSeeded(String),
    DecodeSeeded(String),
}

fn print_usage(program: &str) -> ! {
    eprintln!("Usage: {} -c|-d|-m|-C MODEL|-D MODEL [-p PREDICTOR]", program);
    eprintln!();
    eprintln!("  -c        compress stdin to stdout");
    eprintln!("  -d        decompress stdin to stdout");
    eprintln!("  -m        train on stdin, dump the model to stdout as text");
    eprintln!("  -C MODEL  compress with a model loaded from MODEL");
    eprintln!("  -D MODEL  decompress with a model loaded from MODEL");
    eprintln!("  -p NAME   predictor: last-byte, byte-pair, shift-xor8, shift-xor16 (default)");
    exit(1);
}

fn parse_args(args: &[String]) -> (Mode, Predictor) {
    let program = args.first().map(String::as_str).unwrap_or("lzp");
    let mut mode: Option<Mode> = None;
    let mut predictor = Predictor::default();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-c" => mode = Some(Mode::Encode),
            "-d" => mode = Some(Mode::Decode),
            "-m" => mode = Some(Mode::Train),
            "-C" | "-D" => {
                let Some(path) = iter.next() else {
                    eprintln!("{}: {} requires a model file", program, arg);
                    print_usage(program);
                };
                mode = Some(if arg == "-C" {
                    Mode::EncodeSeeded(path.clone())
                } else {
                    Mode::DecodeSeeded(path.clone())
                });
            }
            "-p" => {
                let Some(name) = iter.next() else {
                    eprintln!("{}: -p requires a predictor name", program);
                    print_usage(program);
                };
                predictor = match name.parse() {
                    Ok(p) => p,
                    Err(_) => {
                        eprintln!("{}: unknown predictor '{}'", program, name);
                        print_usage(program);
                    }
                };
            }
            other => {
                eprintln!("{}: unknown flag '{}'", program, other);
                print_usage(program);
            }
        }
    }

    match mode {
        Some(mode) => (mode, predictor),
        None => print_usage(program),
    }
}

fn report(metrics: &SessionMetrics) {
    eprint!("{}", metrics.report());
}

fn run(mode: Mode, predictor: Predictor) -> lzp::Result<()> {
    let mut source = ReaderSource::new(io::stdin().lock());
    let stdout = io::stdout().lock();

    match mode {
        Mode::Encode => {
            let mut sink = WriterSink::new(BufWriter::new(stdout));
            let mut encoder = Encoder::new(predictor);
            encoder.encode(&mut source, &mut sink)?;
            flush(sink)?;
            report(encoder.metrics());
        }
        Mode::Decode => {
            let mut sink = WriterSink::new(BufWriter::new(stdout));
            let mut decoder = Decoder::new(predictor);
            decoder.decode(&mut source, &mut sink)?;
            flush(sink)?;
            report(decoder.metrics());
        }
        Mode::Train => {
            let mut encoder = Encoder::new(predictor);
            encoder.encode(&mut source, &mut NullSink)?;
            report(encoder.metrics());
            dump::write_model(&encoder.into_model(), stdout)?;
        }
        Mode::EncodeSeeded(path) => {
            let model = dump::load_from_file(predictor, &path)?;
            let mut sink = WriterSink::new(BufWriter::new(stdout));
            let mut encoder = Encoder::with_model(model);
            encoder.encode(&mut source, &mut sink)?;
            flush(sink)?;
            report(encoder.metrics());
        }
        Mode::DecodeSeeded(path) => {
            let model = dump::load_from_file(predictor, &path)?;
            let mut sink = WriterSink::new(BufWriter::new(stdout));
            let mut decoder = Decoder::with_model(model);
            decoder.decode(&mut source, &mut sink)?;
            flush(sink)?;
            report(decoder.metrics());
        }
    }

    Ok(())
}

fn flush<W: Write>(sink: WriterSink<W>) -> lzp::Result<()> {
    sink.into_inner()
        .flush()
        .map_err(|e| lzp::StreamError::Write(e.to_string()))?;
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let (mode, predictor) = parse_args(&args);

    if let Err(err) = run(mode, predictor) {
        eprintln!("lzp: {}", err);
        exit(2);
    }
}
