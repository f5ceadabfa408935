//! Writes a deterministic synthetic HR dataset to `hr_analytics_dataset.csv`
//! so the dashboard has something to show out of the box.

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // (department, share of headcount, attrition bias)
    let departments: [(&str, f64, f64); 5] = [
        ("Sales", 0.28, 0.12),
        ("Support", 0.20, 0.10),
        ("Technical", 0.22, 0.02),
        ("R&D", 0.18, -0.04),
        ("HR", 0.12, 0.00),
    ];
    let salaries: [(&str, f64, f64); 3] = [
        ("low", 0.45, 0.10),
        ("medium", 0.40, 0.02),
        ("high", 0.15, -0.06),
    ];

    let n_employees = 300;
    let output_path = "hr_analytics_dataset.csv";

    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "Department",
            "SalaryLevel",
            "Attrition",
            "SatisfactionLevel",
            "LastEvaluation",
            "AverageMonthlyHours",
            "TenureYears",
            "NumProjects",
        ])
        .expect("Failed to write header");

    for _ in 0..n_employees {
        let department = pick(&mut rng, &departments);
        let salary = pick(&mut rng, &salaries);

        let satisfaction = rng.gauss(0.62, 0.20).clamp(0.05, 1.0);
        let evaluation = rng.gauss(0.72, 0.13).clamp(0.3, 1.0);
        let hours = rng.gauss(200.0, 28.0).clamp(120.0, 310.0).round();
        let tenure = rng.range(1, 10);
        let projects = rng.range(2, 7);

        // Leaving is driven by low satisfaction, then nudged by department
        // and salary band; high performers on long hours churn a bit more.
        let mut p_leave = 0.08 + 0.55 * (0.75 - satisfaction).max(0.0);
        p_leave += department.2 + salary.2;
        if evaluation > 0.85 && hours > 230.0 {
            p_leave += 0.08;
        }
        let attrition = rng.next_f64() < p_leave.clamp(0.0, 0.95);

        let satisfaction_s = format!("{satisfaction:.2}");
        let evaluation_s = format!("{evaluation:.2}");
        let hours_s = format!("{hours:.0}");
        let tenure_s = tenure.to_string();
        let projects_s = projects.to_string();
        writer
            .write_record([
                department.0,
                salary.0,
                if attrition { "1" } else { "0" },
                satisfaction_s.as_str(),
                evaluation_s.as_str(),
                hours_s.as_str(),
                tenure_s.as_str(),
                projects_s.as_str(),
            ])
            .expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!("Wrote {n_employees} employee records to {output_path}");
}

/// Weighted choice over (label, weight, bias) triples.
fn pick<'a>(rng: &mut SimpleRng, choices: &'a [(&'a str, f64, f64)]) -> &'a (&'a str, f64, f64) {
    let total: f64 = choices.iter().map(|c| c.1).sum();
    let mut roll = rng.next_f64() * total;
    for choice in choices {
        if roll < choice.1 {
            return choice;
        }
        roll -= choice.1;
    }
    &choices[choices.len() - 1]
}
