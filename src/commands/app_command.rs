use crate::planting::{find_preset, CropPreset, Shape, CROP_PRESETS};
use crate::storage::Category;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum RateInput {
    Crop(&'static CropPreset),
    PerSquareMeter(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Plan {
        shape: String,
        dim1: f64,
        dim2: f64,
        rate: RateInput,
    },
    Crops,
    Inventory,
    Add {
        name: String,
        category: Category,
        quantity: i64,
        expiration_date: NaiveDate,
    },
    Poll,
    Scan {
        path: PathBuf,
    },
    Help,
    Quit,
    Unknown(String),
}

pub const HELP_TEXT: &str = "Commands: plan <shape> <d1> [d2] [crop|rate] | crops | inventory | add <name> <category> <qty> <YYYY-MM-DD> | poll | scan <image> | help | quit";

const PLAN_USAGE: &str = "usage: plan <rectangle|square|circle> <d1> [d2] [crop|rate]";
const ADD_USAGE: &str = "usage: add <name> <grain|fertilizer|pesticide|machinery> <qty> <YYYY-MM-DD>";

impl FromStr for AppCommand {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(AppCommand::Unknown("".to_string()));
        }

        match parts[0] {
            "plan" => Ok(parse_plan(&parts[1..])),
            "crops" => Ok(AppCommand::Crops),
            "inventory" | "inv" | "ls" => Ok(AppCommand::Inventory),
            "add" => Ok(parse_add(&parts[1..])),
            "poll" | "refresh" => Ok(AppCommand::Poll),
            "scan" => {
                let path = parts[1..].join(" ");
                if path.is_empty() {
                    Ok(AppCommand::Unknown("usage: scan <image path>".to_string()))
                } else {
                    Ok(AppCommand::Scan {
                        path: PathBuf::from(path),
                    })
                }
            }
            "help" | "h" => Ok(AppCommand::Help),
            "quit" | "q" | "exit" => Ok(AppCommand::Quit),
            _ => Ok(AppCommand::Unknown(format!("unknown command: {}", parts[0]))),
        }
    }
}

fn parse_plan(args: &[&str]) -> AppCommand {
    let Some(shape) = args.first() else {
        return AppCommand::Unknown(PLAN_USAGE.to_string());
    };
    let Some(dim1) = args.get(1).and_then(|s| s.parse::<f64>().ok()) else {
        return AppCommand::Unknown(PLAN_USAGE.to_string());
    };

    let mut idx = 2;
    let mut dim2 = 0.0;
    if shape.parse::<Shape>() == Ok(Shape::Rectangle) {
        match args.get(2).and_then(|s| s.parse::<f64>().ok()) {
            Some(v) => dim2 = v,
            None => return AppCommand::Unknown("a rectangle needs two dimensions".to_string()),
        }
        idx = 3;
    }

    let rate = match args.get(idx..).map(|rest| rest.join(" ")) {
        Some(tok) if !tok.is_empty() => {
            if let Ok(v) = tok.parse::<f64>() {
                RateInput::PerSquareMeter(v)
            } else if let Some(preset) = find_preset(&tok) {
                RateInput::Crop(preset)
            } else {
                return AppCommand::Unknown(format!("unknown crop: {}", tok));
            }
        }
        _ => RateInput::Crop(&CROP_PRESETS[0]),
    };

    AppCommand::Plan {
        shape: shape.to_string(),
        dim1,
        dim2,
        rate,
    }
}

fn parse_add(args: &[&str]) -> AppCommand {
    if args.len() < 4 {
        return AppCommand::Unknown(ADD_USAGE.to_string());
    }
    let n = args.len();
    let name = args[..n - 3].join(" ");
    let category = match args[n - 3].parse::<Category>() {
        Ok(c) => c,
        Err(e) => return AppCommand::Unknown(e),
    };
    let quantity = match args[n - 2].parse::<i64>() {
        Ok(q) if q >= 1 => q,
        _ => return AppCommand::Unknown("quantity must be a whole number ≥ 1".to_string()),
    };
    let expiration_date = match NaiveDate::parse_from_str(args[n - 1], "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => return AppCommand::Unknown("expiration date must be YYYY-MM-DD".to_string()),
    };

    AppCommand::Add {
        name,
        category,
        quantity,
        expiration_date,
    }
}
