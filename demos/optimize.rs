use clap::Parser;

use z3_rs::context::Context;
use z3_rs::optimize::Optimizer;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Total budget.
    #[arg(value_name = "INT", default_value = "10")]
    budget: i64,

    /// Minimize the cost instead of maximizing the profit.
    #[clap(long)]
    min: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    let ctx = Context::new()?;
    let a = ctx.int_const("a")?;
    let b = ctx.int_const("b")?;

    let opt = Optimizer::new(&ctx)?;
    opt.assert(a.ge(1) & b.ge(1))?;
    opt.assert((2 * a + 3 * b).le(args.budget))?;

    let objective = if args.min {
        opt.minimize(2 * a + 3 * b)?
    } else {
        opt.maximize(5 * a + 4 * b)?
    };

    let model = opt.check_model()?;
    println!("a = {}", model.eval_i64(a)?);
    println!("b = {}", model.eval_i64(b)?);
    println!(
        "objective #{} in [{}, {}]",
        objective.index(),
        opt.lower(objective)?,
        opt.upper(objective)?
    );

    Ok(())
}
