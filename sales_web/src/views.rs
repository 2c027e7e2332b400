//! HTML rendering from formatted strings.
//!
//! Templating engines are deliberately out of scope; every page is a
//! plain string built around a shared shell.

use sales_model::predict::PredictionInputs;
use sales_model::{ModelBlob, ModelSpec};

/// Escape text for interpolation into HTML.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn page(title: &str, nav: bool, body: &str) -> String {
    let nav_html = if nav {
        concat!(
            "<nav><a href=\"/\">Home</a> | <a href=\"/sales\">Sales Data</a> | ",
            "<a href=\"/summary\">Model Summary</a> | <a href=\"/predict\">Prediction</a> | ",
            "<a href=\"/logout\">Logout</a></nav>"
        )
    } else {
        ""
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n{nav}\n{body}\n</body>\n</html>",
        title = escape(title),
        nav = nav_html,
        body = body,
    )
}

fn flash_block(flash: Option<&str>) -> String {
    match flash {
        Some(message) => format!("<p class=\"flash\">{}</p>", escape(message)),
        None => String::new(),
    }
}

pub fn login_page(flash: Option<&str>) -> String {
    let body = format!(
        "{flash}<h1>Sign in</h1>\n\
         <form method=\"post\" action=\"/login\">\n\
         <label>Username <input type=\"text\" name=\"username\"></label><br>\n\
         <label>Password <input type=\"password\" name=\"password\"></label><br>\n\
         <button type=\"submit\">Login</button>\n\
         </form>",
        flash = flash_block(flash),
    );
    page("Login", false, &body)
}

pub fn home_page(user: &str, flash: Option<&str>) -> String {
    let body = format!(
        "{flash}<h1>Welcome, {user}</h1>\n\
         <p>Use the navigation above to browse the sales data, inspect the \
         fitted model or request a prediction.</p>",
        flash = flash_block(flash),
        user = escape(user),
    );
    page("Home", true, &body)
}

pub fn error_page(message: &str) -> String {
    let body = format!("<h1>Error</h1>\n<p>{}</p>", escape(message));
    page("Error", false, &body)
}

pub fn sales_page(user: &str, headers: &[String], rows: &[Vec<String>]) -> String {
    let mut table = String::from("<table border=\"1\">\n<thead><tr>");
    for header in headers {
        table.push_str(&format!("<th scope=\"col\">{}</th>", escape(header)));
    }
    table.push_str("</tr></thead>\n<tbody>\n");
    for row in rows {
        table.push_str("<tr>");
        for cell in row {
            table.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        table.push_str("</tr>\n");
    }
    table.push_str("</tbody>\n</table>");

    let body = format!(
        "<h1>Sales Data</h1>\n<p>Signed in as {}.</p>\n{}",
        escape(user),
        table
    );
    page("Sales Data", true, &body)
}

/// Regression equation in the trained column order, intercept first.
fn equation(blob: &ModelBlob) -> String {
    let mut parts = String::new();
    for (name, coefficient) in blob.model.coefficients() {
        if name == "const" {
            parts.push_str(&format!("{:.4}", coefficient));
        } else {
            parts.push_str(&format!(" + {:.4} * {}", coefficient, name.replace('_', " ")));
        }
    }
    format!("{} = {}", blob.response, parts)
}

pub fn summary_page(user: &str, blob: &ModelBlob) -> String {
    let summary = blob.model.summary();

    let mut metrics = String::from("<table border=\"1\">\n");
    for (label, value) in [
        ("R-squared", format!("{:.4}", summary.r_squared)),
        ("Adj. R-squared", format!("{:.4}", summary.adj_r_squared)),
        ("F-statistic", format!("{:.4}", summary.f_statistic)),
        ("Prob (F-statistic)", format!("{:.4}", summary.f_pvalue)),
        ("Observations", summary.n_obs.to_string()),
        (
            "Independent variables",
            blob.model.n_independent().to_string(),
        ),
    ] {
        metrics.push_str(&format!(
            "<tr><th scope=\"row\">{}</th><td>{}</td></tr>\n",
            label, value
        ));
    }
    metrics.push_str("</table>");

    let mut coefficients = String::from(
        "<table border=\"1\">\n<thead><tr><th scope=\"col\">Variable</th>\
         <th scope=\"col\">Coefficient</th></tr></thead>\n<tbody>\n",
    );
    for (name, coefficient) in blob.model.coefficients() {
        coefficients.push_str(&format!(
            "<tr><td>{}</td><td>{:.4}</td></tr>\n",
            escape(name),
            coefficient
        ));
    }
    coefficients.push_str("</tbody>\n</table>");

    let features = blob
        .trained_features
        .iter()
        .map(|f| escape(f))
        .collect::<Vec<_>>()
        .join(", ");

    let body = format!(
        "<h1>Model Summary</h1>\n<p>Signed in as {user}.</p>\n\
         <h2>Fit metrics</h2>\n{metrics}\n\
         <h2>Equation</h2>\n<p><code>{equation}</code></p>\n\
         <h2>Coefficients</h2>\n{coefficients}\n\
         <h2>Trained features</h2>\n<p>{features}</p>",
        user = escape(user),
        metrics = metrics,
        equation = escape(&equation(blob)),
        coefficients = coefficients,
        features = features,
    );
    page("Model Summary", true, &body)
}

pub fn predict_page(
    user: &str,
    spec: &ModelSpec,
    blob: &ModelBlob,
    prediction: Option<f64>,
    inputs: Option<&PredictionInputs>,
    error: Option<&str>,
) -> String {
    let summary = blob.model.summary();

    let mut form = format!(
        "<form method=\"post\" action=\"/predict\">\n\
         <label>{numeric} <input type=\"text\" name=\"{numeric}\"></label><br>\n",
        numeric = escape(spec.numeric_var()),
    );
    for (name, levels) in spec.form_variables() {
        form.push_str(&format!("<label>{} <select name=\"{}\">\n", escape(name), escape(name)));
        for level in levels {
            form.push_str(&format!(
                "<option value=\"{level}\">{level}</option>\n",
                level = escape(level)
            ));
        }
        form.push_str("</select></label><br>\n");
    }
    form.push_str("<button type=\"submit\">Predict</button>\n</form>");

    let error_html = match error {
        Some(message) => format!("<p class=\"error\">{}</p>", escape(message)),
        None => String::new(),
    };

    let result_html = match prediction {
        Some(value) => {
            let mut echoed = String::new();
            if let Some(inputs) = inputs {
                echoed.push_str("<ul>\n");
                for (name, value) in inputs {
                    echoed.push_str(&format!(
                        "<li>{}: {}</li>\n",
                        escape(name),
                        escape(value)
                    ));
                }
                echoed.push_str("</ul>");
            }
            format!(
                "<h2>Predicted {}</h2>\n<p><strong>{:.4}</strong></p>\n{}",
                escape(&blob.response),
                value,
                echoed
            )
        }
        None => String::new(),
    };

    let body = format!(
        "<h1>Prediction</h1>\n<p>Signed in as {user}.</p>\n\
         <p>R-squared: {r2:.4} | Adj. R-squared: {adj:.4}</p>\n\
         {error}{form}\n{result}",
        user = escape(user),
        r2 = summary.r_squared,
        adj = summary.adj_r_squared,
        error = error_html,
        form = form,
        result = result_html,
    );
    page("Prediction", true, &body)
}
