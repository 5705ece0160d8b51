use axum::{response::Html, routing::get, Router};

pub fn router() -> Router {
    Router::new().route("/", get(index))
}

/// The dashboard page. Layout is fixed at startup; nothing is rendered
/// beyond the upload control until a file is present. Every control
/// change posts the full filter state back and re-renders from the
/// server's re-run of the pipeline.
async fn index() -> Html<&'static str> {
    Html(r##"<!doctype html>
<html lang="pt-br">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Análise de Arquivos de RH</title>
  <style>
    body { font-family: Arial, sans-serif; margin: 2rem; color: #1d1d1f; max-width: 1100px; }
    h1 { margin-bottom: 0.5rem; }
    .card { border: 1px solid #ddd; padding: 1rem; border-radius: 8px; margin-bottom: 1rem; }
    .layout { display: flex; gap: 1rem; align-items: flex-start; }
    aside { width: 280px; flex-shrink: 0; }
    main { flex-grow: 1; min-width: 0; }
    label { display: block; margin-top: 0.75rem; font-weight: 600; }
    input, select { width: 100%; padding: 0.4rem; box-sizing: border-box; }
    input[type=checkbox] { width: auto; }
    button { margin-top: 1rem; padding: 0.6rem 1rem; }
    pre { background: #f6f8fa; padding: 1rem; overflow: auto; white-space: pre-wrap; }
    table { border-collapse: collapse; width: 100%; margin-bottom: 1rem; }
    th, td { border: 1px solid #ddd; padding: 0.3rem 0.5rem; text-align: left; }
    th { background: #f6f8fa; }
    .warning { background: #fff3cd; color: #664d03; padding: 0.5rem; border-radius: 4px; margin-top: 0.75rem; display: none; }
    .hidden { display: none; }
    img.chart { max-width: 100%; margin-bottom: 1rem; border: 1px solid #eee; }
  </style>
</head>
<body>
  <h1>Análise de Arquivos de RH</h1>

  <div class="card">
    <label for="fileInput">Carregar arquivo</label>
    <input id="fileInput" type="file" accept=".csv,.xlsx,.pdf,.docx" />
    <button id="uploadBtn">Carregar</button>
    <div id="uploadStatus"></div>
  </div>

  <div class="layout">
    <aside id="sidebar" class="card hidden">
      <h2>Filtros de Análise de RH</h2>
      <label for="departmentSelect">Selecione o Departamento</label>
      <select id="departmentSelect"></select>
      <label for="roleSelect">Selecione os Cargos</label>
      <select id="roleSelect" multiple size="6"></select>
      <label for="cpfInput">Digite o CPF</label>
      <input id="cpfInput" type="text" />
      <label for="statusSelect">Selecione o Status</label>
      <select id="statusSelect"></select>
      <label><input id="showTable" type="checkbox" checked /> Mostrar Tabela</label>
      <div id="sidebarWarning" class="warning"></div>
      <button id="exportBtn">Exportar Dados Filtrados</button>
    </aside>

    <main>
      <div id="textOutput" class="card hidden">
        <h2 id="textTitle"></h2>
        <pre id="textBody"></pre>
      </div>
      <div id="tableOutput" class="hidden">
        <div id="loadedBlock">
          <h3>Dados Carregados:</h3>
          <div id="loadedTable"></div>
        </div>
        <h3>Dados Filtrados:</h3>
        <div id="filteredTable"></div>
        <h3 id="totalLine"></h3>
        <div id="chartsBlock"></div>
      </div>
    </main>
  </div>

  <script>
    const el = (id) => document.getElementById(id);
    let datasetId = null;
    // false until the user touches the role multi-select; the server then
    // defaults the selection to every distinct role.
    let rolesDirty = false;
    let renderSeq = 0;

    function selectedRoles() {
      return Array.from(el('roleSelect').selectedOptions).map((o) => o.value);
    }

    function buildPayload() {
      const filters = {
        department: el('departmentSelect').value || 'Todos',
        cpf: el('cpfInput').value,
        status: el('statusSelect').value || 'Todos',
      };
      if (rolesDirty) {
        filters.roles = selectedRoles();
      }
      return {
        dataset_id: datasetId,
        filters: filters,
        show_table: el('showTable').checked,
      };
    }

    function fillSelect(select, values, keepCurrent) {
      const current = select.value;
      select.innerHTML = '';
      for (const value of values) {
        const opt = document.createElement('option');
        opt.value = value;
        opt.textContent = value;
        select.appendChild(opt);
      }
      if (keepCurrent && values.includes(current)) {
        select.value = current;
      }
    }

    function fillRoles(values) {
      const select = el('roleSelect');
      const previous = selectedRoles();
      const sameOptions =
        select.options.length === values.length &&
        values.every((v, i) => select.options[i].value === v);
      select.innerHTML = '';
      for (const value of values) {
        const opt = document.createElement('option');
        opt.value = value;
        opt.textContent = value;
        // Default: everything selected; keep the user's picks while the
        // option list is unchanged.
        opt.selected = sameOptions && rolesDirty ? previous.includes(value) : true;
        select.appendChild(opt);
      }
      if (!sameOptions) {
        rolesDirty = false;
      }
    }

    function renderTable(container, columns, rows) {
      const table = document.createElement('table');
      const head = table.createTHead().insertRow();
      for (const col of columns) {
        const th = document.createElement('th');
        th.textContent = col;
        head.appendChild(th);
      }
      const body = table.createTBody();
      for (const row of rows) {
        const tr = body.insertRow();
        for (const cell of row) {
          tr.insertCell().textContent = cell;
        }
      }
      container.innerHTML = '';
      container.appendChild(table);
    }

    async function runAnalysis() {
      if (!datasetId) return;
      const seq = ++renderSeq;
      const res = await fetch('/api/analysis', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(buildPayload()),
      });
      const json = await res.json();
      if (seq !== renderSeq) return;

      if (!res.ok) {
        el('tableOutput').classList.add('hidden');
        el('uploadStatus').textContent = json.error || 'Falha na análise.';
        return;
      }
      el('uploadStatus').textContent = '';

      fillSelect(el('departmentSelect'), ['Todos'].concat(json.options.departments), true);
      fillRoles(json.options.roles);
      if (json.options.statuses) {
        fillSelect(el('statusSelect'), ['Todos'].concat(json.options.statuses), true);
      }

      const warning = el('sidebarWarning');
      if (json.status === 'halted') {
        warning.textContent = json.warning;
        warning.style.display = 'block';
        el('tableOutput').classList.add('hidden');
        return;
      }
      warning.style.display = 'none';

      el('tableOutput').classList.remove('hidden');
      el('loadedBlock').style.display = json.show_table ? 'block' : 'none';
      renderTable(el('loadedTable'), json.columns, json.rows);
      renderTable(el('filteredTable'), json.columns, json.rows);
      el('totalLine').textContent = 'Total de Funcionários: ' + json.total;

      const charts = el('chartsBlock');
      charts.innerHTML = '';
      for (const chart of json.charts || []) {
        const title = document.createElement('h3');
        title.textContent = chart.title;
        const img = document.createElement('img');
        img.className = 'chart';
        img.src = chart.url + '?t=' + Date.now();
        img.alt = chart.title;
        charts.appendChild(title);
        charts.appendChild(img);
      }
    }

    el('uploadBtn').addEventListener('click', async () => {
      const input = el('fileInput');
      if (!input.files.length) {
        el('uploadStatus').textContent = 'Selecione um arquivo primeiro.';
        return;
      }
      const formData = new FormData();
      formData.append('file', input.files[0]);
      el('uploadStatus').textContent = 'Carregando...';

      const res = await fetch('/api/files', { method: 'POST', body: formData });
      const json = await res.json();

      datasetId = null;
      rolesDirty = false;
      el('sidebar').classList.add('hidden');
      el('textOutput').classList.add('hidden');
      el('tableOutput').classList.add('hidden');

      if (!res.ok) {
        el('uploadStatus').textContent = json.error || 'Falha ao carregar o arquivo.';
        return;
      }

      if (json.kind === 'table') {
        datasetId = json.dataset.id;
        el('uploadStatus').textContent = json.dataset.filename;
        el('sidebar').classList.remove('hidden');
        await runAnalysis();
      } else if (json.kind === 'text') {
        const label = json.dataset.content_type === 'application/pdf' ? 'PDF' : 'DOCX';
        el('textTitle').textContent = 'Dados Carregados (' + label + '):';
        el('textBody').textContent = json.text;
        el('textOutput').classList.remove('hidden');
        el('uploadStatus').textContent = json.dataset.filename;
      } else {
        el('uploadStatus').textContent = '';
      }
    });

    el('departmentSelect').addEventListener('change', () => {
      rolesDirty = false;
      runAnalysis();
    });
    el('roleSelect').addEventListener('change', () => {
      rolesDirty = true;
      runAnalysis();
    });
    el('cpfInput').addEventListener('change', runAnalysis);
    el('statusSelect').addEventListener('change', runAnalysis);
    el('showTable').addEventListener('change', runAnalysis);

    el('exportBtn').addEventListener('click', async () => {
      if (!datasetId) return;
      const res = await fetch('/api/export', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(buildPayload()),
      });
      if (!res.ok) {
        const json = await res.json();
        el('uploadStatus').textContent = json.error || 'Falha ao exportar.';
        return;
      }
      const blob = await res.blob();
      const link = document.createElement('a');
      link.href = URL.createObjectURL(blob);
      link.download = 'dados_filtrados.csv';
      link.click();
      URL.revokeObjectURL(link.href);
    });
  </script>
</body>
</html>"##)
}
