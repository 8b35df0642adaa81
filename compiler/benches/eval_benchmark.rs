use criterion::{black_box, criterion_group, criterion_main, Criterion};
use molt_parser::parse_source;
use molt_runtime::{Interpreter, RunConfig};

const PROGRAM: &str = "\
fib(n) = { n < 2: n, fib(n - 1) + fib(n - 2) }
below(x) = { y | y < x, y > 0 }
eval fib(15)
check 7 in below(20) & { z | z / 7 in {0, 1, 2} }
";

fn bench_eval(c: &mut Criterion) {
    let program = match parse_source(PROGRAM) {
        Ok(program) => program,
        Err(err) => panic!("benchmark program does not parse: {err}"),
    };
    c.bench_function("eval_program", |b| {
        b.iter(|| {
            let mut interpreter = Interpreter::new(RunConfig::default());
            black_box(interpreter.run(&program))
        })
    });
}

criterion_group!(benches, bench_eval);
criterion_main!(benches);
