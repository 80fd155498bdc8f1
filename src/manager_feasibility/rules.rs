use crate::manager_feasibility::models::{Conditions, JobType, Verdict, WeldingMethod};

// Thresholds are per job, the humidity limits of 85 and 90 are not interchangeable.

/// Evaluates one job with the current rule table
///
/// # Arguments
///
/// * 'job' - job type to evaluate
/// * 'c' - weather readings and site facts
pub fn current(job: JobType, c: &Conditions) -> Verdict {
    match job {
        JobType::Concrete => concrete(c),
        JobType::Painting => painting(c),
        JobType::Steel => steel(c),
        JobType::Waterproof => waterproof(c),
        JobType::Tile => tile(c),
        JobType::Welding => welding(c),
        JobType::Formwork => formwork(c),
    }
}

fn concrete(c: &Conditions) -> Verdict {
    let avg_temp = c.avg_temp.unwrap_or(c.temp);
    let rain_rate = c.rain_rate.unwrap_or(c.rain / 3.0);

    if avg_temp <= 4.0 {
        Verdict::prohibited("타설 금지 (일평균 기온 4°C 이하, 한중 콘크리트)")
    } else if rain_rate > 3.0 {
        Verdict::prohibited("타설 금지 (시간당 강우 3mm 초과)")
    } else if c.temp > 35.0 {
        Verdict::prohibited("타설 금지 (기온 35°C 초과, 급속 건조)")
    } else {
        Verdict::permitted()
    }
}

fn painting(c: &Conditions) -> Verdict {
    if c.temp < 5.0 || c.humidity > 85.0 || c.rain > 0.0 {
        Verdict::prohibited("도장 금지 (저온, 고습 또는 강우)")
    } else {
        Verdict::permitted()
    }
}

fn steel(c: &Conditions) -> Verdict {
    if c.wind >= 10.0 {
        Verdict::prohibited("고소작업 금지 (풍속 10m/s 이상)")
    } else {
        Verdict::permitted()
    }
}

fn waterproof(c: &Conditions) -> Verdict {
    if c.rain > 0.0 || c.humidity > 85.0 {
        Verdict::prohibited("방수 금지 (강우 또는 습도 85% 초과)")
    } else {
        Verdict::permitted()
    }
}

fn tile(c: &Conditions) -> Verdict {
    if c.temp < 5.0 {
        Verdict::prohibited("조적작업 금지 (기온 5°C 미만)")
    } else if !(18.0..=22.0).contains(&c.temp) {
        Verdict::cautioned("주의 (접착제 적정 온도 18~22°C 벗어남)")
    } else {
        Verdict::permitted()
    }
}

fn welding(c: &Conditions) -> Verdict {
    if c.temp < 10.0 && !c.preheated {
        Verdict::prohibited("용접 금지 (기온 10°C 미만, 예열 필요)")
    } else if c.wind >= 5.0 {
        Verdict::prohibited("용접 금지 (풍속 5m/s 이상, 방풍막 필요)")
    } else if c.welding_method == Some(WeldingMethod::Tig) && c.wind >= 2.0 {
        Verdict::prohibited("TIG 용접 금지 (풍속 2m/s 이상, 보호가스 이탈)")
    } else if c.rain > 0.0 || c.humidity > 90.0 {
        Verdict::prohibited("용접 금지 (강우 또는 습도 90% 초과)")
    } else {
        Verdict::permitted()
    }
}

fn formwork(c: &Conditions) -> Verdict {
    if c.wind >= 10.0 {
        Verdict::prohibited("거푸집 작업 금지 (풍속 10m/s 이상)")
    } else if c.rain > 0.0 {
        Verdict::cautioned("주의 (강우, 목재 함수율 확인)")
    } else if c.temp <= 5.0 {
        Verdict::cautioned("주의 (저온, 동결 주의)")
    } else {
        Verdict::permitted()
    }
}

/// Evaluates one job with the first revision of the rule table.
/// Returns None for jobs that revision does not know about.
///
/// # Arguments
///
/// * 'job' - job type to evaluate
/// * 'c' - weather readings
pub fn legacy(job: JobType, c: &Conditions) -> Option<Verdict> {
    let verdict = match job {
        JobType::Concrete if c.temp < 5.0 || c.temp > 30.0 || c.wind >= 7.0 => {
            Verdict::prohibited("타설 금지")
        }
        JobType::Painting if c.humidity > 85.0 || c.rain > 0.0 => Verdict::prohibited("도장 금지"),
        JobType::Steel if c.wind >= 10.0 => Verdict::prohibited("고소작업 금지"),
        JobType::Waterproof if c.rain > 0.0 => Verdict::prohibited("방수 금지"),
        JobType::Tile if c.temp < 0.0 || c.rain > 0.0 => Verdict::prohibited("조적작업 금지"),
        JobType::Welding | JobType::Formwork => return None,
        _ => Verdict::permitted(),
    };

    Some(verdict)
}
