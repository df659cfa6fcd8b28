//! pwm-sim: poke at the combat rules from the command line
//!
//! Prints hit-chance tables, checks them against Monte-Carlo trials,
//! previews elemental damage and runs small melee duels.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pwm_core::combat::{Projection, adjust_dam, hit_chance, py_attack, test_hit};
use pwm_core::dungeon::{Chunk, Loc};
use pwm_core::monster::MonsterRace;
use pwm_core::object::{Object, TVal};
use pwm_core::player::{ClassId, Player, PlayerId, RaceId};
use pwm_core::{Aspect, CombatConstants, CombatContext, ConfigError, World};

#[derive(Parser)]
#[command(name = "pwm-sim")]
#[command(about = "Combat simulator for pwm-core", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file overriding the built-in combat constants
    #[arg(long, global = true)]
    constants: Option<PathBuf>,

    /// Log debug events
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print hit chances for one skill against a range of armour classes
    HitChance {
        #[arg(long)]
        to_hit: i32,
        #[arg(long, default_value_t = 150)]
        ac_max: i32,
        #[arg(long, default_value_t = 10)]
        step: i32,
    },
    /// Roll many attacks and compare with the predicted chance
    Trials {
        #[arg(long)]
        to_hit: i32,
        #[arg(long)]
        ac: i32,
        #[arg(long, default_value_t = 100_000)]
        count: u32,
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
    /// Preview elemental damage after resistance
    Adjust {
        /// Projection name, e.g. fire or light_weak
        #[arg(long)]
        element: Projection,
        #[arg(long)]
        dam: i32,
        #[arg(long, default_value_t = 0)]
        resist: i32,
        #[arg(long, default_value = "average")]
        aspect: Aspect,
    },
    /// A warrior fights an arena monster to the death
    Duel {
        #[arg(long, default_value_t = 20)]
        level: i32,
        #[arg(long, default_value_t = 100)]
        monster_hp: i32,
        #[arg(long, default_value_t = 30)]
        monster_ac: i32,
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_target(false)
        .init();
}

fn load_constants(path: Option<&PathBuf>) -> Result<CombatConstants, ConfigError> {
    match path {
        Some(path) => CombatConstants::load_from_file(path),
        None => Ok(CombatConstants::default()),
    }
}

fn print_hit_table(to_hit: i32, ac_max: i32, step: i32) {
    println!("{:>6} {:>8}", "ac", "chance");
    for ac in (0..=ac_max.max(0)).step_by(step.max(1) as usize) {
        let chance = hit_chance(to_hit, ac);
        println!("{ac:>6} {:>7.2}%", 100.0 * chance.as_fraction());
    }
}

fn run_trials(to_hit: i32, ac: i32, count: u32, seed: u64) {
    let mut ctx = CombatContext::new(seed);
    let hits = (0..count).filter(|_| test_hit(to_hit, ac, &mut ctx.rng)).count();
    let observed = hits as f64 / count.max(1) as f64;
    let predicted = hit_chance(to_hit, ac).as_fraction();
    println!("predicted {:.4}", predicted);
    println!("observed  {:.4} ({hits}/{count})", observed);
}

fn run_duel(constants: CombatConstants, level: i32, monster_hp: i32, monster_ac: i32, seed: u64) {
    let mut chunk = Chunk::walled(7, 7);
    let mut p = Player::new(PlayerId(1), "Champion", RaceId::Human, ClassId::Warrior, level);
    p.grid = Loc::new(3, 3);
    p.state.num_blows = 100 + 10 * level;
    p.wield(Object::new(TVal::Sword, "Long Sword").with_dice(2, 5).with_bonus(level / 5, level / 5));
    let id = chunk.add_player(p);
    let arena = Loc::new(4, 3);
    let race = MonsterRace::new("arena beast", level, monster_ac, monster_hp);
    let mid = chunk.add_monster(race, arena);

    let mut world = World::new(CombatContext::with_constants(constants, seed), chunk);
    let mut rounds = 0;
    while world.chunk.monster(mid).is_some() && rounds < 1000 {
        py_attack(&mut world.chunk, id, arena, &mut world.ctx);
        world.tick();
        rounds += 1;
    }

    if let Some(p) = world.chunk.player_mut(id) {
        for message in p.drain_messages() {
            println!("{}", message.text);
        }
    }
    match world.chunk.monster(mid) {
        Some(mon) => println!("-- gave up after {rounds} rounds, {} hp left", mon.hp),
        None => println!("-- won in {rounds} rounds"),
    }
}

fn main() -> Result<(), ConfigError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let constants = load_constants(cli.constants.as_ref())?;

    match cli.command {
        Command::HitChance {
            to_hit,
            ac_max,
            step,
        } => print_hit_table(to_hit, ac_max, step),
        Command::Trials {
            to_hit,
            ac,
            count,
            seed,
        } => run_trials(to_hit, ac, count, seed),
        Command::Adjust {
            element,
            dam,
            resist,
            aspect,
        } => {
            let mut ctx = CombatContext::with_constants(constants, 0);
            let adjusted = adjust_dam(None, element, dam, aspect, resist.clamp(-1, 3), &mut ctx);
            println!("{element}: {dam} -> {adjusted}");
        }
        Command::Duel {
            level,
            monster_hp,
            monster_ac,
            seed,
        } => run_duel(constants, level, monster_hp, monster_ac, seed),
    }
    Ok(())
}
