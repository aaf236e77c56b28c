// src/main.rs
//
// Calculatrice RPN — point d’entrée NATIF + WEB (WASM)
// ----------------------------------------------------
// - NATIF : CLI (clap) ; sans sous-commande, ouvre le pavé (eframe::run_native)
// - WEB   : eframe::WebRunner sur <canvas id="the_canvas_id">
//
// Journal : tracing-subscriber sur stderr (RUST_LOG > config > "warn"),
// stdout reste lisible par une machine (--json).

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;

use app::AppCalc;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice RPN";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use anyhow::Context as _;
    use clap::{Args, Parser, Subcommand};
    use tracing::{debug, error};
    use tracing_subscriber::EnvFilter;

    use calculatrice_rpn::config::Config;
    use calculatrice_rpn::noyau::{
        CalcError, CalcSettings, Calculator, EvaluateRequest, EvaluateResponse, EvaluationResult,
        ExpressionMode, KeyPressRequest, RoundingMode, SettingsOverrides,
    };

    use super::{egui, AppCalc, TITRE_APP};

    #[derive(Debug, Parser)]
    #[command(name = "calculatrice-rpn", version, about = "Calculatrice infixe / RPN")]
    struct Cli {
        /// Fichier de configuration (défaut : <config_dir>/calculatrice-rpn/config.toml)
        #[arg(long, global = true, value_name = "PATH")]
        config: Option<PathBuf>,

        #[command(subcommand)]
        commande: Option<Commande>,
    }

    #[derive(Debug, Subcommand)]
    enum Commande {
        /// Évalue une expression
        Eval {
            #[command(flatten)]
            options: Options,
            #[arg(allow_hyphen_values = true)]
            expression: String,
        },
        /// Rejoue une suite de touches (ex: 1 2 + 3 =)
        Keys {
            #[command(flatten)]
            options: Options,
            #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
            keys: Vec<String>,
        },
    }

    #[derive(Debug, Args)]
    struct Options {
        /// L’entrée est en notation postfixe
        #[arg(long)]
        rpn: bool,
        /// Affiche la trace d’évaluation
        #[arg(long)]
        trace: bool,
        /// Chiffres après la virgule (1..=28)
        #[arg(long, value_name = "N")]
        precision: Option<u32>,
        /// ToEven, AwayFromZero, ToZero, ToNegativeInfinity, ToPositiveInfinity
        #[arg(long, value_name = "MODE")]
        rounding: Option<RoundingMode>,
        /// Réponse JSON sur stdout
        #[arg(long)]
        json: bool,
    }

    impl Options {
        fn mode(&self) -> ExpressionMode {
            if self.rpn {
                ExpressionMode::Postfix
            } else {
                ExpressionMode::Infix
            }
        }

        fn overrides(&self) -> Option<SettingsOverrides> {
            if self.precision.is_none() && self.rounding.is_none() {
                return None;
            }
            Some(SettingsOverrides {
                precision: self.precision,
                rounding: self.rounding,
            })
        }
    }

    pub fn main() -> ExitCode {
        let cli = Cli::parse();

        let config = Config::load(cli.config.as_deref());
        let filtre = config
            .as_ref()
            .map(|c| c.logging.filter.clone())
            .unwrap_or_else(|_| "warn".to_string());
        init_journal(&filtre);

        let resultat = config
            .context("loading configuration")
            .and_then(|c| c.settings().context("loading configuration"))
            .and_then(|defauts| lancer(cli.commande, defauts));

        match resultat {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => rapporter(&e),
        }
    }

    fn init_journal(filtre: &str) {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(filtre))
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        // déjà installé (tests) : on garde l’existant
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Erreur de calcul : "<titre>: <message>" + code de sortie de la catégorie.
    fn rapporter(e: &anyhow::Error) -> ExitCode {
        match e.downcast_ref::<CalcError>() {
            Some(calc) => {
                let categorie = calc.category();
                eprintln!("{}: {}", categorie.title(), calc);
                ExitCode::from(u8::try_from(categorie.exit_code()).unwrap_or(1))
            }
            None => {
                eprintln!("error: {e:#}");
                ExitCode::FAILURE
            }
        }
    }

    fn lancer(commande: Option<Commande>, defauts: CalcSettings) -> anyhow::Result<()> {
        let calc = Calculator::new(calculatrice_rpn::noyau::catalogue(), defauts);

        match commande {
            None => ouvrir_pave(defauts),
            Some(Commande::Eval {
                options,
                expression,
            }) => {
                let requete = EvaluateRequest {
                    expression,
                    mode: options.mode(),
                    return_trace: options.trace,
                    settings: options.overrides(),
                };
                let r = calc.evaluate(&requete)?;
                afficher(&r, &options)
            }
            Some(Commande::Keys { options, keys }) => {
                let requete = KeyPressRequest {
                    keys,
                    mode: options.mode(),
                    return_trace: options.trace,
                    settings: options.overrides(),
                };
                let r = calc.process_keys(&requete)?;
                afficher(&r, &options)
            }
        }
    }

    fn afficher(r: &EvaluationResult, options: &Options) -> anyhow::Result<()> {
        if options.json {
            let reponse = EvaluateResponse::from_result(r, options.mode());
            println!("{}", serde_json::to_string_pretty(&reponse)?);
            return Ok(());
        }

        if options.trace {
            for ligne in r.trace() {
                println!("{ligne}");
            }
        }
        println!("{}", r.value_text());
        Ok(())
    }

    fn ouvrir_pave(defauts: CalcSettings) -> anyhow::Result<()> {
        debug!(precision = defauts.precision.digits(), rounding = %defauts.rounding, "opening keypad");

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(TITRE_APP)
                .with_inner_size([420.0, 680.0])
                .with_min_inner_size([360.0, 560.0]),
            ..Default::default()
        };

        eframe::run_native(
            TITRE_APP,
            options,
            Box::new(move |_cc| Ok(Box::new(AppCalc::new(defauts)))),
        )
        .map_err(|e| {
            error!(erreur = %e, "keypad failed");
            anyhow::anyhow!("cannot start the keypad: {e}")
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    cli::main()
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;
        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;
        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|_cc| Ok(Box::<AppCalc>::default())),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
