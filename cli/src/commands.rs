use std::io::Write;

use chrono::Utc;
use volley_core::announce::{
    CachePolicy, CountdownScript, arrival_announcement, launch_script, line_fingerprint,
    rally_script,
};
use volley_core::plan::{SynchronizedSchedule, launch_schedule, rally_schedule};
use volley_core::rally::EnemyRally;
use volley_core::roster::{
    Actor, DEFAULT_ATTACK_GROUP, format_clock, parse_actor_spec,
};

use crate::context::CliContext;

// ─── Roster ──────────────────────────────────────────────────────────────────

pub async fn register(specs: &[String], group: Option<u32>, ctx: &CliContext) {
    let Some(group) = resolve_group(group) else {
        return;
    };

    let mut roster = ctx.roster.write().await;
    for text in specs {
        let spec = match parse_actor_spec(text) {
            Ok(spec) => spec,
            Err(err) => {
                println!("error: {err}");
                continue;
            }
        };

        let actor = Actor::new(spec.name, spec.timing, group);
        let name = actor.name.clone();
        let timing = actor.timing.display();
        match roster.register(actor) {
            Some(_) => println!("Updated {name} ({timing})"),
            None => println!("Registered {name} ({timing})"),
        }
    }
}

pub async fn update(name: &str, timing: &str, group: Option<u32>, ctx: &CliContext) {
    if group == Some(0) {
        println!("error: attack group must be a positive integer");
        return;
    }

    // Timing shares the actor-spec grammar ("25" travel, "11:02" send).
    let spec = match parse_actor_spec(&format!("{name}:{timing}")) {
        Ok(spec) => spec,
        Err(err) => {
            println!("error: {err}");
            return;
        }
    };

    let mut roster = ctx.roster.write().await;
    match roster.update(name, spec.timing, group) {
        Ok(()) => println!("Updated {} ({})", name, spec.timing.display()),
        Err(err) => println!("error: {err}"),
    }
}

pub async fn remove(name: &str, ctx: &CliContext) {
    match ctx.roster.write().await.remove(name) {
        Ok(actor) => println!("Removed {}", actor.name),
        Err(err) => println!("error: {err}"),
    }
}

pub async fn clear(ctx: &CliContext) {
    let removed = ctx.roster.write().await.clear();
    println!("Cleared {removed} actors");
}

pub async fn clear_group(group: u32, ctx: &CliContext) {
    let removed = ctx.roster.write().await.clear_group(group);
    println!("Cleared {removed} actors from group {group}");
}

pub async fn list(ctx: &CliContext) {
    let roster = ctx.roster.read().await;
    if roster.is_empty() {
        println!("No actors registered");
        return;
    }

    println!("{:<20} {:<16} Group", "Actor", "Timing");
    println!("{}", "-".repeat(44));

    for actor in roster.all() {
        let preset_marker = match &actor.preset_slot {
            Some(slot) => format!(" (preset {slot})"),
            None => String::new(),
        };
        println!(
            "{:<20} {:<16} {}{}",
            actor.name,
            actor.timing.display(),
            actor.attack_group,
            preset_marker
        );
    }

    println!("\nTotal: {} actors", roster.len());
}

pub async fn groups(ctx: &CliContext) {
    let roster = ctx.roster.read().await;
    let groups = roster.attack_groups();
    if groups.is_empty() {
        println!("No actors registered");
        return;
    }

    for group in groups {
        println!("Group {}: {} actors", group, roster.count_in_group(group));
    }
}

// ─── Countdown ───────────────────────────────────────────────────────────────

pub async fn launch(group: Option<u32>, ctx: &CliContext) {
    if group == Some(0) {
        println!("error: attack group must be a positive integer");
        return;
    }

    let schedule = {
        let roster = ctx.roster.read().await;
        match launch_schedule(&roster.all(), group, Utc::now()) {
            Ok(schedule) => schedule,
            Err(err) => {
                println!("error: {err}");
                return;
            }
        }
    };
    let script = {
        let settings = ctx.settings.read().await;
        launch_script(&schedule, &settings.voice)
    };

    print_plan(&schedule);
    if let Err(err) = ctx.countdown.schedule(script).await {
        println!("error: {err}");
        return;
    }
    if let Err(err) = ctx.countdown.start().await {
        println!("error: {err}");
        return;
    }
    println!("Countdown started.");
}

pub async fn preview(group: Option<u32>, ctx: &CliContext) {
    if group == Some(0) {
        println!("error: attack group must be a positive integer");
        return;
    }

    let schedule = {
        let roster = ctx.roster.read().await;
        match launch_schedule(&roster.all(), group, Utc::now()) {
            Ok(schedule) => schedule,
            Err(err) => {
                println!("error: {err}");
                return;
            }
        }
    };
    let script = {
        let settings = ctx.settings.read().await;
        launch_script(&schedule, &settings.voice)
    };

    print_plan(&schedule);
    print_script(&script);
}

pub async fn stop(ctx: &CliContext) {
    if ctx.countdown.cancel().await {
        println!("Countdown stopped.");
    } else {
        println!("No countdown running.");
    }
}

pub async fn status(ctx: &CliContext) {
    for line in status_report(ctx).await {
        println!("{line}");
    }
}

async fn status_report(ctx: &CliContext) -> Vec<String> {
    let sink = if ctx.sink.is_ready() { "ready" } else { "unavailable" };
    vec![
        format!("Countdown: {}", ctx.countdown.state().await),
        format!("Sink: {sink}"),
        format!("Actors: {}", ctx.roster.read().await.len()),
        format!("Rallies: {}", ctx.board.read().await.len()),
        format!("Cached announcements: {}", ctx.cache.len()),
    ]
}

// ─── Rallies ─────────────────────────────────────────────────────────────────

pub async fn rally_add(name: &str, muster: u32, march: u32, group: Option<u32>, ctx: &CliContext) {
    let Some(group) = resolve_group(group) else {
        return;
    };

    let mut board = ctx.board.write().await;
    match board.track(name, muster, march, group) {
        Ok(rally) => println!(
            "Tracking rally {} (lead time {})",
            rally.name,
            format_clock(rally.total_lead_secs())
        ),
        Err(err) => println!("error: {err}"),
    }
}

pub async fn rally_edit(name: &str, muster: u32, march: u32, group: Option<u32>, ctx: &CliContext) {
    if group == Some(0) {
        println!("error: attack group must be a positive integer");
        return;
    }

    let mut board = ctx.board.write().await;
    match board.update(name, muster, march, group) {
        Ok(()) => println!("Updated rally {name}"),
        Err(err) => println!("error: {err}"),
    }
}

pub async fn rally_remove(name: &str, ctx: &CliContext) {
    match ctx.board.write().await.remove(name) {
        Ok(rally) => println!("Removed rally {}", rally.name),
        Err(err) => println!("error: {err}"),
    }
}

pub async fn rally_list(ctx: &CliContext) {
    let board = ctx.board.read().await;
    if board.is_empty() {
        println!("No rallies tracked");
        return;
    }

    let now = Utc::now();
    println!("{:<20} {:<10} {:<12} Group", "Rally", "State", "Arrives in");
    println!("{}", "-".repeat(52));

    for rally in board.all() {
        let arrives = match rally.time_until_arrival(now) {
            Some(secs) => format_clock(secs),
            None => "-".to_string(),
        };
        println!(
            "{:<20} {:<10} {:<12} {}",
            rally.name,
            rally.state(now),
            arrives,
            rally.attack_group
        );
    }

    println!("\nTotal: {} rallies", board.len());
}

pub async fn rally_start(name: &str, ctx: &CliContext) {
    let rally = {
        let mut board = ctx.board.write().await;
        match board.start(name, Utc::now()) {
            Ok(rally) => rally,
            Err(err) => {
                println!("error: {err}");
                return;
            }
        }
    };

    println!(
        "Rally {} started (arrives in {})",
        rally.name,
        format_clock(rally.total_lead_secs())
    );
    start_rally_countdown(&rally, ctx).await;
}

pub async fn rally_preview(name: &str, ctx: &CliContext) {
    let mut rally = {
        let board = ctx.board.read().await;
        match board.get(name) {
            Some(rally) => rally.clone(),
            None => {
                println!("error: rally {name:?} not found");
                return;
            }
        }
    };

    let now = Utc::now();
    if rally.started_at.is_none() {
        rally.started_at = Some(now);
        println!("(previewing as if started now)");
    }

    let schedule = {
        let roster = ctx.roster.read().await;
        match rally_schedule(&rally, &roster.all(), Some(rally.attack_group), now) {
            Ok(schedule) => schedule,
            Err(err) => {
                println!("error: {err}");
                return;
            }
        }
    };
    let script = {
        let settings = ctx.settings.read().await;
        rally_script(&rally.name, &schedule, &settings.voice, settings.prepare_lead_secs)
    };

    print_plan(&schedule);
    print_script(&script);
}

pub async fn rally_announce(name: &str, ctx: &CliContext) {
    let (rally_name, seconds) = {
        let board = ctx.board.read().await;
        match board.get(name) {
            Some(rally) => {
                let seconds = rally
                    .time_until_arrival(Utc::now())
                    .unwrap_or_else(|| rally.total_lead_secs());
                (rally.name.clone(), seconds)
            }
            None => {
                println!("error: rally {name:?} not found");
                return;
            }
        }
    };

    let text = arrival_announcement(&rally_name, seconds);
    speak_line(&text, ctx).await;
}

pub async fn rally_save(
    slot: &str,
    name: &str,
    muster: u32,
    march: u32,
    actor_specs: &[String],
    ctx: &CliContext,
) {
    let mut actors = Vec::with_capacity(actor_specs.len());
    for text in actor_specs {
        match parse_actor_spec(text) {
            Ok(spec) => actors.push(spec),
            Err(err) => {
                println!("error: {err}");
                return;
            }
        }
    }

    let actor_count = actors.len();
    let mut board = ctx.board.write().await;
    match board.save_preset(slot, name, muster, march, actors) {
        Ok(()) => println!("Saved preset {slot} ({actor_count} actors)"),
        Err(err) => println!("error: {err}"),
    }
}

pub async fn rally_presets(ctx: &CliContext) {
    let board = ctx.board.read().await;
    let presets = board.presets();
    if presets.is_empty() {
        println!("No presets saved");
        return;
    }

    println!("{:<16} {:<20} {:<10} Actors", "Slot", "Rally", "Lead");
    println!("{}", "-".repeat(54));

    for preset in &presets {
        println!(
            "{:<16} {:<20} {:<10} {}",
            preset.slot,
            preset.rally_name,
            format_clock(preset.total_lead_secs()),
            preset.actors.len()
        );
    }

    println!("\nTotal: {} presets", presets.len());
}

pub async fn rally_delete_preset(slot: &str, ctx: &CliContext) {
    match ctx.board.write().await.delete_preset(slot) {
        Ok(preset) => println!("Deleted preset {}", preset.slot),
        Err(err) => println!("error: {err}"),
    }
}

pub async fn rally_load(slot: &str, ctx: &CliContext) {
    let rally = {
        let mut board = ctx.board.write().await;
        let mut roster = ctx.roster.write().await;
        let rally_name = match board.load_preset(slot, &mut roster) {
            Ok(name) => name,
            Err(err) => {
                println!("error: {err}");
                return;
            }
        };
        match board.start(&rally_name, Utc::now()) {
            Ok(rally) => rally,
            Err(err) => {
                println!("error: {err}");
                return;
            }
        }
    };

    println!(
        "Loaded preset {slot}: rally {} started (arrives in {})",
        rally.name,
        format_clock(rally.total_lead_secs())
    );
    start_rally_countdown(&rally, ctx).await;
}

// ─── Settings ────────────────────────────────────────────────────────────────

pub async fn show_settings(ctx: &CliContext) {
    let settings = ctx.settings.read().await;
    println!(
        "Voice: {} at {} wpm ({})",
        settings.voice.voice, settings.voice.rate_wpm, settings.voice.platform_tag
    );
    println!("Prepare lead: {}s", settings.prepare_lead_secs);
    match settings.cache_policy {
        CachePolicy::Unbounded => println!("Cache policy: unbounded"),
        CachePolicy::MaxEntries(max) => println!("Cache policy: max {max} entries"),
    }
}

pub fn exit() {
    write!(std::io::stdout(), "quitting...").expect("error exiting");
    std::io::stdout().flush().expect("error flushing stdout");
}

// ─── Shared plumbing ─────────────────────────────────────────────────────────

/// Compute and arm a countdown against a started rally.
async fn start_rally_countdown(rally: &EnemyRally, ctx: &CliContext) {
    let schedule = {
        let roster = ctx.roster.read().await;
        match rally_schedule(rally, &roster.all(), Some(rally.attack_group), Utc::now()) {
            Ok(schedule) => schedule,
            Err(err) => {
                println!("error: {err}");
                return;
            }
        }
    };
    let script = {
        let settings = ctx.settings.read().await;
        rally_script(&rally.name, &schedule, &settings.voice, settings.prepare_lead_secs)
    };

    print_plan(&schedule);
    if let Err(err) = ctx.countdown.schedule(script).await {
        println!("error: {err}");
        return;
    }
    if let Err(err) = ctx.countdown.start().await {
        println!("error: {err}");
        return;
    }
    println!("Countdown started against rally {}.", rally.name);
}

/// Render one ad-hoc line through the cache and deliver it.
async fn speak_line(text: &str, ctx: &CliContext) {
    let voice = ctx.settings.read().await.voice.clone();
    let fingerprint = line_fingerprint(text, &voice);

    let artifact = ctx
        .cache
        .get_or_render(&fingerprint, || async {
            ctx.renderer.render(text, &voice).await
        })
        .await;

    match artifact {
        Ok(artifact) => {
            if let Err(err) = ctx.sink.send(&artifact).await {
                println!("error: {err}");
            }
        }
        Err(err) => println!("error: {err}"),
    }
}

/// Default the attack group, rejecting an explicit zero.
fn resolve_group(group: Option<u32>) -> Option<u32> {
    match group {
        Some(0) => {
            println!("error: attack group must be a positive integer");
            None
        }
        Some(group) => Some(group),
        None => Some(DEFAULT_ATTACK_GROUP),
    }
}

fn print_plan(schedule: &SynchronizedSchedule) {
    println!(
        "Plan ({} actors, {}s total):",
        schedule.entries.len(),
        schedule.total_duration
    );
    for entry in &schedule.entries {
        let late_marker = if entry.late { " (late)" } else { "" };
        println!(
            "  {}. {:<20} T+{}s ({}){}",
            entry.rank,
            entry.name,
            entry.fire_offset,
            entry.timing.display(),
            late_marker
        );
    }
    match schedule.target_arrival {
        Some(arrival) => println!("  Adversary arrives at {}", arrival.format("%H:%M:%S UTC")),
        None => println!("  All actions land at T+{}s", schedule.total_duration),
    }
}

fn print_script(script: &CountdownScript) {
    println!("Script ({} lines):", script.lines.len());
    for line in &script.lines {
        println!("  [{:>4}s] {}", line.fire_offset, line.text);
    }
}
