use clap::Parser;

use z3_rs::config::Config;
use z3_rs::context::Context;
use z3_rs::solver::{SatResult, Solver};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Solve over integers instead of reals.
    #[clap(long)]
    int: bool,

    /// Solver timeout (in milliseconds).
    #[clap(long, value_name = "INT", default_value = "10000")]
    timeout: u64,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    let ctx = Context::with_config(&Config::default().timeout_ms(args.timeout))?;
    let (x, y, z) = if args.int {
        (ctx.int_const("x")?, ctx.int_const("y")?, ctx.int_const("z")?)
    } else {
        (ctx.real_const("x")?, ctx.real_const("y")?, ctx.real_const("z")?)
    };

    // 3x + 2y - z == 1
    // 2x - 2y + 4z == -2
    // x - y/2 - z == 0
    let system = [
        (3 * x + 2 * y - z, 1),
        (2 * x - 2 * y + 4 * z, -2),
        (x - y / 2 - z, 0),
    ];

    let solver = Solver::new(&ctx)?;
    for (lhs, rhs) in &system {
        solver.assert(lhs.clone()._eq(*rhs))?;
    }
    println!("solver:\n{}", solver);

    let res = solver.check()?;
    println!("result = {}", res);
    if res != SatResult::Sat {
        return Ok(());
    }

    let model = solver.get_model()?;
    println!("model:\n{}", model);
    for (name, value) in model.assignments()? {
        println!("{} = {}", name, value);
    }
    for (lhs, rhs) in system {
        println!("{} = {} (expected {})", lhs, model.eval_string(lhs.clone())?, rhs);
    }

    Ok(())
}
