use chrono::Local;
use polars::prelude::{AnyValue, DataFrame};
use std::io::{self, Write};
use std::str::FromStr;
use workforce_plan::{
    AggregatedPlan, CONVERSION_FACTOR_RANGE, CategorySetting, ExportFormat, GenerationMode,
    LaborCategory, LaborTable, ModuleConfig, MonthKey, PlanError, PlanRequest, ProjectConfig,
    ProjectType, WinterBreak, export_plan, load_request_from_json, logging, save_request_to_json,
};

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let cell = |ci: usize, row_idx: usize| -> String {
        match columns[ci].get(row_idx) {
            Ok(AnyValue::Null) | Err(_) => String::new(),
            Ok(AnyValue::UInt32(v)) => v.to_string(),
            Ok(AnyValue::String(s)) => s.to_string(),
            Ok(av) => av.to_string(),
        }
    };

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.chars().count()).collect();
    for (ci, width) in widths.iter_mut().enumerate() {
        for row_idx in 0..df.height() {
            *width = (*width).max(cell(ci, row_idx).chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let push_row = |out: &mut String, values: Vec<String>| {
        out.push('|');
        for (ci, value) in values.iter().enumerate() {
            let pad = widths[ci].saturating_sub(value.chars().count());
            out.push(' ');
            out.push_str(value);
            out.push_str(&" ".repeat(pad));
            out.push_str(" |");
        }
        out.push('\n');
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, col_names.clone());
    out.push_str(&sep);
    out.push('\n');
    for row_idx in 0..df.height() {
        let values = (0..columns.len()).map(|ci| cell(ci, row_idx)).collect();
        push_row(&mut out, values);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                                   Show this help\n  types                                  List project types, phases and labor categories\n  show                                   Show the configured projects\n  add <type> [name]                      Add a project instance (e.g. add bridge 2号桥)\n  enable|disable <p>                     Include or exclude project <p>\n  dates <p> <m> <YYYY-MM> <YYYY-MM>      Set the start and end month of a phase\n  team <p> <m> <n>                       Set the number of parallel teams\n  mode <p> <m> <curve|constant|normal>   Select the generation mode\n  set <p> <m> <category> <count>         Enable a category with a headcount (manual modes)\n  unset <p> <m> <category>               Disable a category (manual modes)\n  skip <p> <m>                           Toggle whether a phase is generated\n  winter <p> <start> <end>|off           Set or clear the winter break months\n  factor <f64>                           Set the export conversion factor\n  generate                               Generate and aggregate the plan\n  export <csv|json> <path>               Export the last generated plan\n  save <path>                            Save the configuration as JSON\n  load <path>                            Load a configuration from JSON\n  quit|exit                              Exit\n\n<p> is the project number shown by 'show'; <m> is a phase number or name."
    );
}

fn print_types() {
    for project_type in ProjectType::ALL {
        println!("{} ({})", project_type.as_str(), project_type.name_zh());
        println!("  phases    : {}", project_type.modules().join(", "));
        let categories = project_type
            .categories()
            .iter()
            .map(|c| c.name_zh())
            .collect::<Vec<_>>()
            .join(", ");
        println!("  categories: {categories}");
    }
}

fn print_request(request: &PlanRequest) {
    println!(
        "{} (conversion factor {})",
        request.metadata.title, request.metadata.conversion_factor
    );
    if request.projects.is_empty() {
        println!("No projects configured.");
        return;
    }
    for (pi, project) in request.projects.iter().enumerate() {
        let winter = project
            .winter_break
            .map(|w| format!(", winter break {}-{}", w.start_month(), w.end_month()))
            .unwrap_or_default();
        println!(
            "[{}] {} ({}){}{}",
            pi + 1,
            project.display_name(),
            project.project_type.as_str(),
            if project.enabled { "" } else { " [disabled]" },
            winter
        );
        for (mi, module) in project.modules.iter().enumerate() {
            println!(
                "    {}. {:<16} {} .. {}  teams={} mode={}{}",
                mi + 1,
                module.name,
                module.start,
                module.end,
                module.team_count,
                module.mode.as_str(),
                if module.enabled { "" } else { " [skipped]" }
            );
            if let Some(workforce) = module.mode.workforce() {
                let enabled = workforce
                    .iter()
                    .filter(|(_, setting)| setting.enabled)
                    .map(|(category, setting)| format!("{}={}", category.name_zh(), setting.count))
                    .collect::<Vec<_>>();
                if !enabled.is_empty() {
                    println!("       {}", enabled.join(" "));
                }
            }
        }
    }
}

fn print_plan(plan: &AggregatedPlan, conversion_factor: f64) {
    match LaborTable::new(plan, conversion_factor).map(|table| table.dataframe()) {
        Ok(Ok(df)) => println!("{}", render_df_as_text_table(&df)),
        Ok(Err(e)) => println!("Error rendering plan: {}", e),
        Err(e) => println!("Error: {}", e),
    }
}

fn project_mut<'a>(request: &'a mut PlanRequest, arg: Option<&str>) -> Option<&'a mut ProjectConfig> {
    let idx = arg?.parse::<usize>().ok()?.checked_sub(1)?;
    request.projects.get_mut(idx)
}

fn module_mut<'a>(project: &'a mut ProjectConfig, arg: Option<&str>) -> Option<&'a mut ModuleConfig> {
    let arg = arg?;
    match arg.parse::<usize>() {
        Ok(n) => n.checked_sub(1).and_then(|idx| project.modules.get_mut(idx)),
        Err(_) => project.module_mut(arg),
    }
}

fn module_args<'a>(
    request: &'a mut PlanRequest,
    p: Option<&str>,
    m: Option<&str>,
) -> Result<(ProjectType, &'a mut ModuleConfig), &'static str> {
    let project = project_mut(request, p).ok_or("Unknown project")?;
    let project_type = project.project_type;
    let module = module_mut(project, m).ok_or("Unknown phase")?;
    Ok((project_type, module))
}

fn report_plan_error(err: &PlanError) {
    match err {
        PlanError::Invalid(errors) => {
            println!("Validation failed:");
            for issue in errors.issues() {
                println!("  - {}", issue);
            }
        }
        other => println!("Generation error: {}", other),
    }
}

fn main() {
    logging::init();

    let mut request = PlanRequest::template(Local::now().date_naive());
    let mut latest: Option<AggregatedPlan> = None;

    println!("Workforce Plan (CLI) - type 'help' for commands\n");
    print_request(&request);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "types" => print_types(),
            "show" => print_request(&request),
            "add" => {
                let Some(type_s) = parts.next() else {
                    println!("Usage: add <type> [name]");
                    continue;
                };
                let project_type = match ProjectType::from_str(type_s) {
                    Ok(t) => t,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                let month = MonthKey::from_date(Local::now().date_naive());
                let mut project = ProjectConfig::template(project_type, month);
                let name = parts.collect::<Vec<_>>().join(" ");
                if !name.is_empty() {
                    project = project.with_name(name);
                }
                request.projects.push(project);
                println!("Added project {}.", request.projects.len());
            }
            "enable" | "disable" => match project_mut(&mut request, parts.next()) {
                Some(project) => {
                    project.enabled = cmd == "enable";
                    println!("Project {} {}d.", project.display_name(), cmd);
                }
                None => println!("Usage: {} <p>", cmd),
            },
            "dates" => {
                let (p, m) = (parts.next(), parts.next());
                let (start_s, end_s) = match (parts.next(), parts.next()) {
                    (Some(s), Some(e)) => (s, e),
                    _ => {
                        println!("Usage: dates <p> <m> <YYYY-MM> <YYYY-MM>");
                        continue;
                    }
                };
                let (start, end) = match (MonthKey::from_str(start_s), MonthKey::from_str(end_s)) {
                    (Ok(s), Ok(e)) => (s, e),
                    _ => {
                        println!("Invalid month (YYYY-MM)");
                        continue;
                    }
                };
                match module_args(&mut request, p, m) {
                    Ok((_, module)) => {
                        module.start = start;
                        module.end = end;
                        println!("{}: {} .. {}", module.name, start, end);
                    }
                    Err(e) => println!("{}", e),
                }
            }
            "team" => {
                let (p, m) = (parts.next(), parts.next());
                let Some(count) = parts.next().and_then(|n| n.parse::<u32>().ok()) else {
                    println!("Usage: team <p> <m> <n>");
                    continue;
                };
                match module_args(&mut request, p, m) {
                    Ok((_, module)) => {
                        module.team_count = count;
                        println!("{}: {} team(s)", module.name, module.effective_team_count());
                    }
                    Err(e) => println!("{}", e),
                }
            }
            "mode" => {
                let (p, m, mode_s) = (parts.next(), parts.next(), parts.next());
                let Some(mode_s) = mode_s else {
                    println!("Usage: mode <p> <m> <curve|constant|normal>");
                    continue;
                };
                match module_args(&mut request, p, m) {
                    Ok((project_type, module)) => {
                        let workforce = module
                            .mode
                            .workforce()
                            .cloned()
                            .unwrap_or_else(|| GenerationMode::default_workforce(project_type));
                        let mode = match mode_s {
                            "curve" => GenerationMode::Curve,
                            "constant" => GenerationMode::Constant { workforce },
                            "normal" => GenerationMode::Normal { workforce },
                            _ => {
                                println!("Invalid mode (curve|constant|normal)");
                                continue;
                            }
                        };
                        module.mode = mode;
                        println!("{}: mode {}", module.name, module.mode.as_str());
                    }
                    Err(e) => println!("{}", e),
                }
            }
            "set" | "unset" => {
                let (p, m, cat_s) = (parts.next(), parts.next(), parts.next());
                let count = parts.next().and_then(|n| n.parse::<u32>().ok());
                let category = match cat_s.map(LaborCategory::from_str) {
                    Some(Ok(c)) => c,
                    Some(Err(e)) => {
                        println!("{}", e);
                        continue;
                    }
                    None => {
                        println!("Usage: set <p> <m> <category> <count> | unset <p> <m> <category>");
                        continue;
                    }
                };
                if cmd == "set" && count.is_none() {
                    println!("Usage: set <p> <m> <category> <count>");
                    continue;
                }
                match module_args(&mut request, p, m) {
                    Ok((project_type, module)) => {
                        if !project_type.uses_category(category) {
                            println!("{} is not used by {}", category, project_type);
                            continue;
                        }
                        let name = module.name.clone();
                        let Some(workforce) = module.mode.workforce_mut() else {
                            println!("{}: switch to constant or normal mode first", name);
                            continue;
                        };
                        let setting = workforce
                            .entry(category)
                            .or_insert_with(|| CategorySetting::disabled(category.default_headcount()));
                        match count {
                            Some(count) if cmd == "set" => *setting = CategorySetting::enabled(count),
                            _ => setting.enabled = false,
                        }
                        println!(
                            "{}: {} {} ({})",
                            name,
                            category,
                            if setting.enabled { "enabled" } else { "disabled" },
                            setting.count
                        );
                    }
                    Err(e) => println!("{}", e),
                }
            }
            "skip" => match module_args(&mut request, parts.next(), parts.next()) {
                Ok((_, module)) => {
                    module.enabled = !module.enabled;
                    println!(
                        "{}: {}",
                        module.name,
                        if module.enabled { "included" } else { "skipped" }
                    );
                }
                Err(e) => println!("{}", e),
            },
            "winter" => {
                let Some(project) = project_mut(&mut request, parts.next()) else {
                    println!("Usage: winter <p> <start> <end>|off");
                    continue;
                };
                match (parts.next(), parts.next()) {
                    (Some("off"), None) => {
                        project.winter_break = None;
                        println!("{}: winter break cleared", project.display_name());
                    }
                    (Some(start_s), Some(end_s)) => {
                        let window = match (start_s.parse::<u32>(), end_s.parse::<u32>()) {
                            (Ok(start), Ok(end)) => WinterBreak::new(start, end),
                            _ => {
                                println!("Invalid month number (1-12)");
                                continue;
                            }
                        };
                        match window {
                            Ok(window) => {
                                project.winter_break = Some(window);
                                println!(
                                    "{}: winter break {}-{}",
                                    project.display_name(),
                                    window.start_month(),
                                    window.end_month()
                                );
                            }
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: winter <p> <start> <end>|off"),
                }
            }
            "factor" => match parts.next().map(str::parse::<f64>) {
                Some(Ok(factor)) if CONVERSION_FACTOR_RANGE.contains(&factor) => {
                    request.metadata.conversion_factor = factor;
                    println!("Conversion factor set to {}.", factor);
                }
                Some(_) => println!(
                    "Invalid factor (must be between {} and {})",
                    CONVERSION_FACTOR_RANGE.start(),
                    CONVERSION_FACTOR_RANGE.end()
                ),
                None => println!("Usage: factor <f64>"),
            },
            "generate" => match request.generate() {
                Ok(plan) => {
                    let (first, last) = match (plan.months().first(), plan.months().last()) {
                        (Some(first), Some(last)) => (first.label_zh(), last.label_zh()),
                        _ => (String::new(), String::new()),
                    };
                    println!(
                        "Generated plan covering {} months ({} - {})",
                        plan.months().len(),
                        first,
                        last
                    );
                    print_plan(&plan, request.metadata.conversion_factor);
                    latest = Some(plan);
                }
                Err(e) => report_plan_error(&e),
            },
            "export" => {
                let format = parts.next().map(ExportFormat::from_str);
                let path = parts.next();
                match (format, path) {
                    (Some(Ok(format)), Some(path)) => {
                        let Some(plan) = latest.as_ref() else {
                            println!("Nothing to export; run 'generate' first.");
                            continue;
                        };
                        match export_plan(plan, request.metadata.conversion_factor, format, path) {
                            Ok(()) => println!("Plan exported to {}", path),
                            Err(e) => println!("Export error: {}", e),
                        }
                    }
                    (Some(Err(e)), _) => println!("{}", e),
                    _ => println!("Usage: export <csv|json> <path>"),
                }
            }
            "save" => match parts.next() {
                Some(path) => match save_request_to_json(&request, path) {
                    Ok(()) => println!("Configuration saved to {}", path),
                    Err(e) => println!("Save error: {}", e),
                },
                None => println!("Usage: save <path>"),
            },
            "load" => match parts.next() {
                Some(path) => match load_request_from_json(path) {
                    Ok(loaded) => {
                        request = loaded;
                        latest = None;
                        println!("Configuration loaded from {}", path);
                        print_request(&request);
                    }
                    Err(e) => println!("Load error: {}", e),
                },
                None => println!("Usage: load <path>"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
