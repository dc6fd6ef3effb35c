//! Minimal HTML shells for the browser-facing routes.

use actix_web::http::header::ContentType;
use actix_web::HttpResponse;

fn page(title: &str, body: &str) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(format!(
        "<!doctype html>\n<html lang=\"pt-BR\">\n<head><meta charset=\"utf-8\"><title>{} | ImobiAI</title></head>\n<body>\n{}\n</body>\n</html>\n",
        title, body
    ))
}

pub async fn home() -> HttpResponse {
    page(
        "Início",
        r#"<h1>ImobiAI</h1><p>Avaliação imobiliária com inteligência artificial.</p>
<a href="/login">Entrar</a> | <a href="/register">Criar conta</a>"#,
    )
}

pub async fn login() -> HttpResponse {
    page(
        "Entrar",
        r#"<form id="login">
  <input name="email" type="email" required>
  <input name="password" type="password" required>
  <button type="submit">Entrar</button>
</form>
<script>
document.getElementById('login').addEventListener('submit', async (e) => {
  e.preventDefault();
  const data = Object.fromEntries(new FormData(e.target));
  const res = await fetch('/api/auth/login', {
    method: 'POST', headers: { 'Content-Type': 'application/json' }, body: JSON.stringify(data)
  });
  if (res.ok) window.location.href = '/dashboard';
});
</script>"#,
    )
}

pub async fn register() -> HttpResponse {
    page(
        "Criar conta",
        r#"<form id="register">
  <input name="name" required>
  <input name="email" type="email" required>
  <input name="password" type="password" required>
  <button type="submit">Cadastrar</button>
</form>
<script>
document.getElementById('register').addEventListener('submit', async (e) => {
  e.preventDefault();
  const data = Object.fromEntries(new FormData(e.target));
  const res = await fetch('/api/auth/register', {
    method: 'POST', headers: { 'Content-Type': 'application/json' }, body: JSON.stringify(data)
  });
  if (res.ok) window.location.href = '/login';
});
</script>"#,
    )
}

pub async fn forgot_password() -> HttpResponse {
    page(
        "Recuperar senha",
        "<p>Entre em contato com o suporte para redefinir sua senha.</p>",
    )
}

pub async fn dashboard() -> HttpResponse {
    page(
        "Painel",
        r#"<h2>Nova Avaliação Imobiliária</h2>
<form id="evaluation">
  <input name="address" required>
  <input name="area" type="number" min="1" required>
  <input name="bedrooms" type="number" min="0">
  <input name="bathrooms" type="number" min="0">
  <input name="parkingSpots" type="number" min="0">
  <textarea name="description" rows="3"></textarea>
  <button type="submit">Avaliar Imóvel</button>
</form>
<button id="logout">Sair</button>
<pre id="result"></pre>
<script>
const num = (v) => (v === '' ? null : Number(v));
document.getElementById('evaluation').addEventListener('submit', async (e) => {
  e.preventDefault();
  const f = new FormData(e.target);
  const body = {
    address: f.get('address'), area: num(f.get('area')), bedrooms: num(f.get('bedrooms')),
    bathrooms: num(f.get('bathrooms')), parkingSpots: num(f.get('parkingSpots')),
    description: f.get('description') || null
  };
  const res = await fetch('/api/evaluations', {
    method: 'POST', headers: { 'Content-Type': 'application/json' }, body: JSON.stringify(body)
  });
  document.getElementById('result').textContent = res.ok
    ? JSON.stringify(await res.json(), null, 2)
    : 'Erro ao processar sua solicitação';
});
document.getElementById('logout').addEventListener('click', async () => {
  await fetch('/api/auth/logout', { method: 'POST' });
  window.location.href = '/login';
});
</script>"#,
    )
}
